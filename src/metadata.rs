//! Stat records for opened objects.

use chrono::{DateTime, Utc};
use std::any::Any;

/// Permission bits reported for every object: `rw-r--r--`.
pub const FILE_MODE: u32 = 0o644;

/// Immutable metadata snapshot taken when an object is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    name: String,
    size: u64,
    modified: DateTime<Utc>,
}

impl FileStat {
    /// Create a stat record.
    pub fn new(name: impl Into<String>, size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
        }
    }

    /// Base name of the object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object size in bytes.
    ///
    /// For handles opened through [`RangedStoreFs`](crate::RangedStoreFs) this is
    /// the size of the whole object, not the number of readable bytes, and is
    /// `0` when the size lookup failed.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time reported by the store.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Permission bits, always [`FILE_MODE`].
    pub fn mode(&self) -> u32 {
        FILE_MODE
    }

    /// Always false; objects are plain files.
    pub fn is_dir(&self) -> bool {
        false
    }

    /// Platform-specific extension data. Always empty.
    pub fn sys(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }
}
