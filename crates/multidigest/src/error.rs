use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("stream is closed")]
    StreamClosed,

    #[error("failed to write checksum file {path}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read checksum file {path}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    Mismatch {
        path:     PathBuf,
        expected: String,
        actual:   String,
    },

    #[error("checksum file {path} does not contain a hexadecimal digest")]
    InvalidHex { path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<multidigest_fs::Error> for Error {
    fn from(err: multidigest_fs::Error) -> Self {
        match err {
            multidigest_fs::Error::Write { path, source } => Error::Write { path, source },
            multidigest_fs::Error::Read { path, source } => Error::Read { path, source },
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
