//! bucketfs - serve objects from an object store as read-only files.
//!
//! This library adapts an object store (S3, GCS, local filesystem, in-memory)
//! to a small file-like contract so that static file servers can serve remote
//! objects as if they were local files:
//! - **StoreFs**: opens an object by name and streams its whole content
//! - **RangedStoreFs**: opens a fixed, inclusive byte range of an object while
//!   reporting the size of the whole object
//!
//! Both produce an [`ObjectFile`] handle with `read`, `stat`, `seek` (a no-op),
//! `readdir` (always empty) and `close`.
//!
//! ```no_run
//! use bucketfs::{ByteRange, FileSystem, RangedStoreFs, StoreConfig};
//!
//! # async fn demo() -> bucketfs::Result<()> {
//! let config = StoreConfig::new("public-sample-data", "us-east-1");
//! let fs = RangedStoreFs::from_config(&config, ByteRange::new(0, 1023)?)?;
//!
//! let mut file = fs.open("/data/passengers.txt").await?;
//! let mut head = vec![0u8; 1024];
//! file.read(&mut head).await?;
//! println!("{} is {} bytes", file.stat().name(), file.stat().size());
//! file.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod fs;
pub mod metadata;
pub mod object_store;
pub mod range;
pub mod storage;

// Re-export commonly used types
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use file::ObjectFile;
pub use fs::{base_name, FileSystem, RangedStoreFs, StoreFs};
pub use metadata::{FileStat, FILE_MODE};
pub use crate::object_store::ObjectStoreBackend;
pub use range::ByteRange;
pub use storage::{ObjectBody, ObjectClient, ObjectInfo, StorageError, StorageResult};

// Re-export convenience functions
pub use crate::object_store::local;
