//! File primitives used to persist checksum sidecar files.
//!
//! Writes go through a temporary file in the destination directory which is
//! renamed over the destination, so a reader never observes a half-written
//! file. Every error carries the path it failed on.

mod error;
mod rw;

pub use error::{Error, Result};
pub use rw::{AtomicWriteOptions, atomic_read, atomic_write, read_to_string, write};
