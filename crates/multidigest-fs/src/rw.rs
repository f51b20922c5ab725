use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub permissions: Option<u32>,
    pub sync:        bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self { Self::default() }

    /// Mode bits applied to the file before it is renamed into place.
    /// Ignored on non-unix platforms.
    ///
    /// Without an explicit mode an existing destination keeps its mode and a
    /// new one gets `0o666` minus the process umask, as a plain write would.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Write `content` to `path` by way of a temporary sibling file.
///
/// The temporary file is removed if anything fails before the rename.
pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_err = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".multidigest.").suffix(".tmp");

    // The creation mode goes through open(2), so the umask still applies.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(parent).map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = options.permissions.or_else(|| {
            fs::metadata(path)
                .ok()
                .map(|m| m.permissions().mode() & 0o7777)
        });
        if let Some(mode) = mode {
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(mode))
                .map_err(write_err)?;
        }
    }

    if options.sync {
        tmp.as_file().sync_all().map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::trace!(path = %path.display(), len = content.len(), "atomic write");

    Ok(())
}

/// Plain overwrite of `path`, with no temporary file.
pub fn write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| Error::Write {
        path:   path.to_path_buf(),
        source: e,
    })
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}
