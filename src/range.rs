//! Inclusive byte ranges requested from the object store.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Inclusive `(start, end)` byte offsets into an object.
///
/// Both ends are inclusive, matching the HTTP `Range: bytes=start-end` header,
/// so `ByteRange::new(0, 0)` covers exactly one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange(format!(
                "start {} is past end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// First byte offset (inclusive).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte offset (inclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Half-open equivalent, `start..end + 1`.
    pub fn to_exclusive(&self) -> std::ops::Range<u64> {
        self.start..self.end.saturating_add(1)
    }

    /// Value of the HTTP `Range` header for this range.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ByteRange {
    type Err = Error;

    /// Parse `"start-end"`, optionally prefixed with `bytes=`.
    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let raw = raw.strip_prefix("bytes=").unwrap_or(raw);
        let (start, end) = raw
            .split_once('-')
            .ok_or_else(|| Error::InvalidRange(format!("expected start-end, got {:?}", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u64>()
                .map_err(|e| Error::InvalidRange(format!("{:?}: {}", s, e)))
        };

        ByteRange::new(parse(start)?, parse(end)?)
    }
}
