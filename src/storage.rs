//! Storage abstraction consumed by the file adapters.

use crate::range::ByteRange;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use thiserror::Error;

/// Storage-related errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found in storage.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Error reported by the underlying object store, passed through unchanged.
    #[error("backend error: {0}")]
    Backend(#[source] object_store::Error),

    /// I/O error during storage operation.
    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<object_store::Error> for StorageError {
    fn from(e: object_store::Error) -> Self {
        match e {
            object_store::Error::NotFound { path, .. } => StorageError::NotFound(path),
            other => StorageError::Backend(other),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Sequential, single-pass stream of object content.
pub type ByteStream = BoxStream<'static, StorageResult<Bytes>>;

/// Response to a GET: the content stream plus the headers that describe it.
pub struct ObjectBody {
    /// Number of bytes the stream will yield (the range length for ranged GETs).
    pub content_length: u64,
    /// Last modification time of the object.
    pub last_modified: DateTime<Utc>,
    /// The object content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectBody")
            .field("content_length", &self.content_length)
            .field("last_modified", &self.last_modified)
            .finish_non_exhaustive()
    }
}

/// Object metadata from a HEAD-style lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Total object size in bytes.
    pub size: u64,
    /// Last modification time of the object.
    pub last_modified: DateTime<Utc>,
}

/// Remote object store client (S3, GCS, local filesystem, in-memory).
///
/// Implementations must report a missing key as [`StorageError::NotFound`]
/// so callers can tell it apart from transport and permission failures.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Fetch an object, or the inclusive byte range of it when `range` is set.
    async fn get(&self, key: &str, range: Option<ByteRange>) -> StorageResult<ObjectBody>;

    /// Fetch object metadata without the content.
    async fn head(&self, key: &str) -> StorageResult<ObjectInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::NotFound("test.bin".to_string());
        assert!(err.to_string().contains("test.bin"));

        let err = StorageError::Io("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = StorageError::Backend(object_store::Error::Generic {
            store: "S3",
            source: "access denied".into(),
        });
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_not_found_is_mapped() {
        let err: StorageError = object_store::Error::NotFound {
            path: "missing.txt".to_string(),
            source: "no such key".into(),
        }
        .into();
        assert!(matches!(err, StorageError::NotFound(ref p) if p == "missing.txt"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err: StorageError = object_store::Error::Generic {
            store: "S3",
            source: "timeout".into(),
        }
        .into();
        match err {
            StorageError::Backend(object_store::Error::Generic { store, .. }) => {
                assert_eq!(store, "S3")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
