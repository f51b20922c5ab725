//! Checksum sidecar files.
//!
//! A sidecar sits next to its target and is named by appending the
//! algorithm's extension to the target's file name, so `metadata.xml` gets
//! `metadata.xml.md5`. Its whole content is the lowercase hex digest with no
//! file name and no trailing newline. Readers trim surrounding whitespace.
//!
//! Writing several sidecars for one target is not transactional: a failure
//! on the second file leaves the first one in place.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use multidigest_fs::AtomicWriteOptions;

use crate::{DigestAlgorithm, Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidecarMode {
    /// Temporary sibling file renamed over the sidecar.
    #[default]
    Atomic,
    /// Plain overwrite.
    Direct,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SidecarOptions {
    mode:        SidecarMode,
    sync:        bool,
    permissions: Option<u32>,
}

impl SidecarOptions {
    pub fn new() -> Self { Self::default() }

    pub fn mode(mut self, mode: SidecarMode) -> Self {
        self.mode = mode;
        self
    }

    /// fsync each sidecar before it is renamed into place. Atomic mode only.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Unix mode bits for each sidecar. Atomic mode only.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn get_mode(&self) -> SidecarMode { self.mode }

    fn atomic_options(&self) -> AtomicWriteOptions {
        let options = AtomicWriteOptions::new().sync(self.sync);
        match self.permissions {
            Some(mode) => options.permissions(mode),
            None => options,
        }
    }
}

/// `<target><extension>`; any existing extension on `target` is kept.
pub fn sidecar_path(target: impl AsRef<Path>, algorithm: &DigestAlgorithm) -> PathBuf {
    let mut name = OsString::from(target.as_ref().as_os_str());
    name.push(algorithm.extension());
    PathBuf::from(name)
}

/// Write `hex_digest` as the sidecar of `target` with default options.
pub fn write(
    target: impl AsRef<Path>,
    algorithm: &DigestAlgorithm,
    hex_digest: &str,
) -> Result<PathBuf> {
    write_with(target, algorithm, hex_digest, &SidecarOptions::default())
}

pub fn write_with(
    target: impl AsRef<Path>,
    algorithm: &DigestAlgorithm,
    hex_digest: &str,
    options: &SidecarOptions,
) -> Result<PathBuf> {
    let path = sidecar_path(target, algorithm);
    match options.mode {
        SidecarMode::Atomic => {
            multidigest_fs::atomic_write(&path, hex_digest.as_bytes(), options.atomic_options())?
        }
        SidecarMode::Direct => multidigest_fs::write(&path, hex_digest.as_bytes())?,
    }
    tracing::debug!(path = %path.display(), algorithm = algorithm.id(), "wrote checksum file");
    Ok(path)
}

/// Content of a checksum file with surrounding whitespace trimmed.
pub fn read(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = multidigest_fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "read checksum file");
    Ok(content.trim().to_string())
}

/// Decoded digest bytes of a checksum file.
pub fn read_digest(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let content = read(path)?;
    hex::decode(&content).map_err(|_| Error::InvalidHex {
        path: path.to_path_buf(),
    })
}

/// Check that the sidecar of `target` holds `expected_hex`. Hex case is ignored.
pub fn verify(
    target: impl AsRef<Path>,
    algorithm: &DigestAlgorithm,
    expected_hex: &str,
) -> Result<()> {
    let path = sidecar_path(target, algorithm);
    let actual = read(&path)?;
    if actual.eq_ignore_ascii_case(expected_hex.trim()) {
        Ok(())
    } else {
        Err(Error::Mismatch {
            path,
            expected: expected_hex.to_string(),
            actual,
        })
    }
}
