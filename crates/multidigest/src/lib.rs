//! Single-pass multi-algorithm digests for byte streams.
//!
//! Wraps a sink so that content and its checksums are produced in one pass,
//! without reading the written data back. Each configured algorithm keeps its
//! own incremental state, fed with exactly the bytes the sink accepted.
//! Closing the stream can persist every digest as a sidecar file next to a
//! target path (`metadata.xml` → `metadata.xml.md5`, `metadata.xml.sha1`).
//!
//! # Key Features
//!
//! - **Single pass**: bytes are hashed as they are written, never buffered
//! - **Live digests**: the digest of everything written so far is observable before close
//! - **Extensible**: algorithms come from a [`Registry`] of id, extension and hasher factory
//! - **Separable persistence**: [`Digests`] is a plain value; [`Digests::persist`] writes sidecars
//!
//! The stream is meant for a single writer. Concurrent producers must
//! serialize their writes.
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use multidigest::MultiDigestWriter;
//!
//! let mut writer = MultiDigestWriter::new(Vec::new());
//! writer.write_all(b"This is a test.").unwrap();
//! writer.close().unwrap();
//!
//! assert_eq!(writer.digest_hex("MD5").unwrap(), "120ea8a25e5d487bf68b5f7096440019");
//! assert_eq!(writer.digest_hex("SHA-1").unwrap(), "afa6c8b3a2fae95785dc7d9685a57835d703ac88");
//! ```

pub use self::accumulator::{AccumulatorSet, DigestAccumulator};
pub use self::algorithm::{
    DEFAULT_ALGORITHMS, DigestAlgorithm, MD5, Registry, SHA1, SHA256, SHA512, resolve,
};
pub use self::digests::Digests;
pub use self::error::{Error, Result};
pub use self::hasher::{DigestHasher, Hasher};
pub use self::options::WriterOptions;
pub use self::reader::{MultiDigestReader, digest_file, digest_reader};
pub use self::sidecar::{SidecarMode, SidecarOptions, sidecar_path};
pub use self::writer::MultiDigestWriter;

#[cfg(feature = "sha3")]
pub use self::algorithm::SHA3_256;

mod accumulator;
mod algorithm;
mod digests;
mod error;
mod hasher;
mod options;
mod reader;
pub mod sidecar;
mod writer;
