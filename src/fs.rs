//! File system adapters: open objects by name.
//!
//! Both adapters address a single flat key space. Only the base name of the
//! requested path is used as the object key, so `"a/report.csv"` and
//! `"b/report.csv"` open the same object.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::file::ObjectFile;
use crate::metadata::FileStat;
use crate::range::ByteRange;
use crate::storage::{ObjectClient, StorageError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Something that can open named, read-only files.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Open the file called `name`.
    async fn open(&self, name: &str) -> Result<ObjectFile>;
}

/// Final path component of `name`, or `None` if it has none (`""`, `"/"`, `".."`).
///
/// Trailing `/` and `/.` components are ignored, so `"foo.txt/."` yields
/// `"foo.txt"` rather than `"."`.
pub fn base_name(name: &str) -> Option<&str> {
    Path::new(name).file_name().and_then(|n| n.to_str())
}

fn object_key(name: &str) -> Result<&str> {
    base_name(name).ok_or_else(|| StorageError::NotFound(name.to_string()).into())
}

/// Serves whole objects from a store.
#[derive(Clone)]
pub struct StoreFs {
    client: Arc<dyn ObjectClient>,
}

impl StoreFs {
    /// Create an adapter over an existing store client.
    pub fn new(client: Arc<dyn ObjectClient>) -> Self {
        Self { client }
    }

    /// Create an adapter over the S3 bucket described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build_client()?)))
    }
}

#[async_trait]
impl FileSystem for StoreFs {
    async fn open(&self, name: &str) -> Result<ObjectFile> {
        let key = object_key(name)?;
        let body = self.client.get(key, None).await?;

        debug!(key, size = body.content_length, "opened object");
        let stat = FileStat::new(key, body.content_length, body.last_modified);
        Ok(ObjectFile::new(stat, body.stream))
    }
}

/// Serves one fixed byte range of each object.
///
/// Handles read only the configured range, but their stat reports the size
/// of the whole object so callers can compute totals such as
/// `Content-Range`. The range is fixed per adapter: build one `RangedStoreFs`
/// for each range you need to serve.
#[derive(Clone)]
pub struct RangedStoreFs {
    client: Arc<dyn ObjectClient>,
    range: ByteRange,
}

impl RangedStoreFs {
    /// Create an adapter over an existing store client.
    pub fn new(client: Arc<dyn ObjectClient>, range: ByteRange) -> Self {
        Self { client, range }
    }

    /// Create an adapter over the S3 bucket described by `config`.
    pub fn from_config(config: &StoreConfig, range: ByteRange) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build_client()?), range))
    }

    /// The range requested on every open.
    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// Total object size, or 0 if the lookup fails.
    ///
    /// A missing size must not block serving range content that was
    /// already fetched, so errors stop here.
    async fn total_size(&self, key: &str) -> u64 {
        match self.client.head(key).await {
            Ok(info) => info.size,
            Err(e) => {
                warn!(key, error = %e, "object size lookup failed, reporting size 0");
                0
            }
        }
    }
}

#[async_trait]
impl FileSystem for RangedStoreFs {
    async fn open(&self, name: &str) -> Result<ObjectFile> {
        let key = object_key(name)?;
        let body = self.client.get(key, Some(self.range)).await?;
        let size = self.total_size(key).await;

        debug!(
            key,
            range = %self.range.header_value(),
            content_length = body.content_length,
            size,
            "opened object range"
        );
        let stat = FileStat::new(key, size, body.last_modified);
        Ok(ObjectFile::new(stat, body.stream))
    }
}
