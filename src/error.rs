//! Error types for the bucketfs library.

use crate::storage::StorageError;
use std::io;
use thiserror::Error;

/// Top-level error type for bucketfs operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Byte range that cannot be requested.
    #[error("invalid byte range: {0}")]
    InvalidRange(String),

    /// The object stream ended before the read buffer was full.
    ///
    /// The first `read` bytes of the buffer hold valid data.
    #[error("unexpected end of stream after {read} bytes")]
    UnexpectedEof { read: usize },

    /// Invalid store configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound(_)))
    }
}

impl From<object_store::Error> for Error {
    fn from(e: object_store::Error) -> Self {
        Error::Storage(e.into())
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            Error::Storage(StorageError::NotFound(_)) => io::Error::new(io::ErrorKind::NotFound, e),
            Error::UnexpectedEof { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Error::InvalidRange(_) | Error::Config(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            other => io::Error::other(other),
        }
    }
}

/// Result type for bucketfs operations.
pub type Result<T> = std::result::Result<T, Error>;
