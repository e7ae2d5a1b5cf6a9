//! Ordered index of committed records.
//!
//! Maps each record's multiple count to the byte range its line occupies
//! in the output buffer. Entries are kept sorted by count, mirroring the
//! line order of the output, so a binary search on count yields both the
//! insertion slot and the byte offset at which to splice a new line.

/// Position of one committed line in the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    /// Multiple count of the record (sort key).
    pub count: u64,
    /// Byte offset where the line begins.
    pub file_position: usize,
    /// Byte length of the line, newline included.
    pub len: usize,
}

impl LinePosition {
    /// Byte offset one past the end of the line.
    #[inline]
    pub fn end(&self) -> usize {
        self.file_position + self.len
    }
}

/// Sorted sequence of [`LinePosition`] entries.
///
/// Invariants after every insert:
/// - counts are non-decreasing
/// - entry `i + 1` starts exactly where entry `i` ends, and entry 0 starts at 0
#[derive(Debug, Default, Clone)]
pub struct OrderedIndex {
    entries: Vec<LinePosition>,
}

impl OrderedIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot at which a record with `count` is inserted.
    ///
    /// Records with an equal count keep arrival order: the returned slot is
    /// after every existing entry whose count is `<= count`.
    #[inline]
    pub fn position_for(&self, count: u64) -> usize {
        self.entries.partition_point(|e| e.count <= count)
    }

    /// Byte offset at which a line inserted at `index` must be spliced.
    #[inline]
    pub fn offset_for(&self, index: usize) -> usize {
        match index.checked_sub(1) {
            Some(prev) => self.entries[prev].end(),
            None => 0,
        }
    }

    /// Insert a record and shift every later entry by `len` bytes.
    ///
    /// Returns the slot the record was placed at.
    pub fn insert(&mut self, count: u64, file_position: usize, len: usize) -> usize {
        let index = self.position_for(count);
        debug_assert_eq!(file_position, self.offset_for(index));

        self.entries.insert(
            index,
            LinePosition {
                count,
                file_position,
                len,
            },
        );

        for entry in &mut self.entries[index + 1..] {
            entry.file_position += len;
        }

        index
    }

    /// Number of committed records.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in output order.
    pub fn entries(&self) -> &[LinePosition] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinePosition> {
        self.entries.iter()
    }

    /// Total bytes covered by the indexed lines.
    pub fn total_bytes(&self) -> usize {
        self.entries.last().map_or(0, LinePosition::end)
    }
}
