use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {path}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Write { path, .. } | Self::Read { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Write { source, .. } | Self::Read { source, .. } => source.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
