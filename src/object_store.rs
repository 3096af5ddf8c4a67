//! object_store adapter implementing the ObjectClient trait.

use crate::range::ByteRange;
use crate::storage::{ObjectBody, ObjectClient, ObjectInfo, StorageError, StorageResult};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use object_store::{local::LocalFileSystem, memory::InMemory, GetOptions, GetRange, ObjectStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// ObjectClient implementation backed by the object_store crate.
#[derive(Debug, Clone)]
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBackend {
    /// Create a new backend from any object_store implementation.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Create a backend for local filesystem storage.
    pub fn local(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        // Create directory if it doesn't exist
        std::fs::create_dir_all(&path)
            .map_err(|e| StorageError::Io(format!("failed to create directory: {}", e)))?;

        let store = LocalFileSystem::new_with_prefix(&path).map_err(StorageError::Backend)?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Create an empty in-memory backend.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
        }
    }

    /// The wrapped object store.
    pub fn inner(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

/// Store location for `key`, used verbatim.
///
/// `Path::from` would percent-encode characters such as `[`, `#` or `%`,
/// asking the store for a different object than the one named.
fn object_path(key: &str) -> StorageResult<object_store::path::Path> {
    object_store::path::Path::parse(key).map_err(|_| StorageError::NotFound(key.to_string()))
}

/// Report a missing object under the key the caller asked for.
fn store_error(key: &str, e: object_store::Error) -> StorageError {
    match e {
        object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
        other => StorageError::Backend(other),
    }
}

fn to_usize(offset: u64) -> StorageResult<usize> {
    usize::try_from(offset)
        .map_err(|_| StorageError::Io(format!("offset {} exceeds addressable size", offset)))
}

#[async_trait]
impl ObjectClient for ObjectStoreBackend {
    async fn get(&self, key: &str, range: Option<ByteRange>) -> StorageResult<ObjectBody> {
        let location = object_path(key)?;
        let mut opts = GetOptions::default();
        if let Some(range) = range {
            let bounds = range.to_exclusive();
            opts.range = Some(GetRange::Bounded(
                to_usize(bounds.start)?..to_usize(bounds.end)?,
            ));
        }

        let result = self
            .store
            .get_opts(&location, opts)
            .await
            .map_err(|e| store_error(key, e))?;
        let content_length = (result.range.end - result.range.start) as u64;
        let last_modified = result.meta.last_modified;
        debug!(
            key,
            content_length,
            object_size = result.meta.size,
            "fetched object"
        );

        let stream = result.into_stream().map_err(StorageError::from).boxed();
        Ok(ObjectBody {
            content_length,
            last_modified,
            stream,
        })
    }

    async fn head(&self, key: &str) -> StorageResult<ObjectInfo> {
        let location = object_path(key)?;
        let meta = self
            .store
            .head(&location)
            .await
            .map_err(|e| store_error(key, e))?;

        Ok(ObjectInfo {
            size: meta.size as u64,
            last_modified: meta.last_modified,
        })
    }
}

/// Convenience function to create a local filesystem backend.
pub fn local(path: impl Into<PathBuf>) -> StorageResult<ObjectStoreBackend> {
    ObjectStoreBackend::local(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use object_store::PutPayload;
    use tempfile::TempDir;

    async fn collect(body: ObjectBody) -> Vec<u8> {
        let chunks: Vec<Bytes> = body.stream.try_collect().await.unwrap();
        chunks.concat()
    }

    async fn seeded_memory() -> ObjectStoreBackend {
        let backend = ObjectStoreBackend::memory();
        backend
            .inner()
            .put(
                &object_store::path::Path::from("test.txt"),
                PutPayload::from_bytes(Bytes::from_static(b"hello world")),
            )
            .await
            .unwrap();
        backend
    }

    #[tokio::test]
    async fn test_memory_get() {
        let store = seeded_memory().await;

        let body = store.get("test.txt", None).await.unwrap();
        assert_eq!(body.content_length, 11);
        assert_eq!(collect(body).await, b"hello world");
    }

    #[tokio::test]
    async fn test_memory_get_range_is_inclusive() {
        let store = seeded_memory().await;

        let range = ByteRange::new(0, 4).unwrap();
        let body = store.get("test.txt", Some(range)).await.unwrap();
        assert_eq!(body.content_length, 5);
        assert_eq!(collect(body).await, b"hello");
    }

    #[tokio::test]
    async fn test_head_reports_total_size() {
        let store = seeded_memory().await;

        let info = store.head("test.txt").await.unwrap();
        assert_eq!(info.size, 11);
    }

    #[tokio::test]
    async fn test_local_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = local(tmp.path()).unwrap();

        let result = store.get("nonexistent.txt", None).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));

        let result = store.head("nonexistent.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_key_is_not_encoded() {
        let backend = ObjectStoreBackend::memory();
        let key = "report[1] #2.csv";
        backend
            .inner()
            .put(
                &object_store::path::Path::parse(key).unwrap(),
                PutPayload::from_bytes(Bytes::from_static(b"a,b\n1,2\n")),
            )
            .await
            .unwrap();

        let body = backend.get(key, None).await.unwrap();
        assert_eq!(collect(body).await, b"a,b\n1,2\n");
        assert_eq!(backend.head(key).await.unwrap().size, 8);
    }

    #[tokio::test]
    async fn test_not_found_names_requested_key() {
        let backend = ObjectStoreBackend::memory();

        match backend.get("missing [v2].txt", None).await {
            Err(StorageError::NotFound(key)) => assert_eq!(key, "missing [v2].txt"),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unparseable_key_is_not_found() {
        let backend = ObjectStoreBackend::memory();

        let result = backend.head("bad\u{1}key").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_get_range() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("test.txt"), b"hello world").unwrap();
        let store = local(tmp.path()).unwrap();

        let range = ByteRange::new(6, 10).unwrap();
        let body = store.get("test.txt", Some(range)).await.unwrap();
        assert_eq!(collect(body).await, b"world");
    }
}
