#![forbid(unsafe_code)]

//! Top-level error type.

use std::fmt;
use std::io;

use crate::data::DataError;

/// Everything that can stop the feed from starting or running.
#[derive(Debug)]
pub enum Error {
    /// The posts could not be loaded.
    Data(DataError),
    /// Terminal or log file I/O failed.
    Io(io::Error),
    /// The command line could not be parsed.
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Usage(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Data(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Usage(_) => None,
        }
    }
}

impl From<DataError> for Error {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for the feed.
pub type Result<T> = std::result::Result<T, Error>;
