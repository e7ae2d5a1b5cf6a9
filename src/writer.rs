//! Record writer.
//!
//! Places each rendered record at its sorted position in an in-memory
//! copy of the output and hands the whole copy to storage, so the output
//! is complete and ordered after every single commit.

use crate::error::Result;
use crate::index::OrderedIndex;
use crate::storage::Storage;
use tracing::debug;

/// A store that keeps committed records ordered by count.
pub trait SortedRecordStore {
    /// Commit one rendered line (newline included) with its count.
    ///
    /// Returns the slot the record landed at in output order.
    fn commit(&mut self, line: &str, count: u64) -> Result<usize>;

    /// Number of committed records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the store at end of input.
    fn finish(&mut self) -> Result<()>;
}

/// [`SortedRecordStore`] backed by a resident output buffer.
///
/// Owns the ordered index and the buffer for the lifetime of a run. Each
/// commit costs one binary search, one O(n) offset shift, one splice and
/// a full rewrite of the storage backend.
pub struct RecordWriter<S: Storage> {
    index: OrderedIndex,
    buffer: String,
    storage: S,
}

impl<S: Storage> RecordWriter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            index: OrderedIndex::new(),
            buffer: String::new(),
            storage,
        }
    }

    /// Current output content.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn index(&self) -> &OrderedIndex {
        &self.index
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Bytes of output content held so far.
    pub fn bytes_written(&self) -> usize {
        self.buffer.len()
    }

    /// Consume the writer and return its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: Storage> SortedRecordStore for RecordWriter<S> {
    fn commit(&mut self, line: &str, count: u64) -> Result<usize> {
        let slot = self.index.position_for(count);
        let offset = self.index.offset_for(slot);

        self.buffer.insert_str(offset, line);
        self.index.insert(count, offset, line.len());

        debug!(
            "Committed record with count {} at slot {} (byte offset {}, {} records)",
            count,
            slot,
            offset,
            self.index.len()
        );

        self.storage.persist(self.buffer.as_bytes())?;
        Ok(slot)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn finish(&mut self) -> Result<()> {
        self.storage.close()
    }
}
