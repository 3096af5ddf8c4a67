//! File handles over remote object streams.

use crate::error::{Error, Result};
use crate::metadata::FileStat;
use crate::storage::ByteStream;
use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::io::SeekFrom;

/// Read-only handle to one opened object.
///
/// Wraps a sequential, single-pass content stream. The handle is not
/// seekable; to read from another offset, open the object again through a
/// [`RangedStoreFs`](crate::RangedStoreFs) configured for that range.
pub struct ObjectFile {
    /// Remote content stream.
    body: ByteStream,
    /// Bytes taken from the stream but not yet handed to a reader.
    pending: Bytes,
    /// Snapshot taken at open time.
    stat: FileStat,
}

impl ObjectFile {
    /// Wrap a content stream and its metadata snapshot.
    pub fn new(stat: FileStat, body: ByteStream) -> Self {
        Self {
            body,
            pending: Bytes::new(),
            stat,
        }
    }

    /// Fill `buf` completely from the object stream.
    ///
    /// Returns `Ok(buf.len())` once the buffer is full and `Ok(0)` when the
    /// stream is already exhausted. [`Error::UnexpectedEof`] is returned only
    /// when the stream ends part way through filling `buf`; it carries the
    /// number of bytes written to the front of `buf`.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;

        while filled < buf.len() {
            if self.pending.is_empty() {
                match self.body.next().await {
                    Some(chunk) => {
                        self.pending = chunk?;
                        continue;
                    }
                    None => break,
                }
            }

            let n = self.pending.len().min(buf.len() - filled);
            let chunk = self.pending.split_to(n);
            buf[filled..filled + n].copy_from_slice(&chunk);
            filled += n;
        }

        if filled == buf.len() || filled == 0 {
            Ok(filled)
        } else {
            Err(Error::UnexpectedEof { read: filled })
        }
    }

    /// Seeking is not supported: always reports position 0 and leaves the
    /// stream where it is.
    pub fn seek(&mut self, _pos: SeekFrom) -> Result<u64> {
        Ok(0)
    }

    /// Objects are never directories, so the listing is always empty.
    pub fn readdir(&self, _count: usize) -> Result<Vec<FileStat>> {
        Ok(Vec::new())
    }

    /// Metadata snapshot taken at open time.
    pub fn stat(&self) -> &FileStat {
        &self.stat
    }

    /// Release the remote stream.
    pub async fn close(self) -> Result<()> {
        drop(self.body);
        Ok(())
    }

    /// Hand the unread content out as a stream, e.g. for an HTTP response body.
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes>> {
        let head = if self.pending.is_empty() {
            None
        } else {
            Some(Ok(self.pending))
        };

        stream::iter(head)
            .chain(self.body.map(|chunk| chunk.map_err(Error::from)))
            .boxed()
    }
}

impl std::fmt::Debug for ObjectFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFile")
            .field("stat", &self.stat)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
