//! Durable storage for the output buffer.
//!
//! Every commit hands the full output content to a [`Storage`] backend,
//! which replaces whatever it held before. The file backend keeps the
//! output valid after each record; the memory backend exists for tests
//! and embedding.

use crate::error::{MultisortError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Destination that receives the complete output content on every commit.
pub trait Storage {
    /// Replace the stored content with `content`.
    fn persist(&mut self, content: &[u8]) -> Result<()>;

    /// Flush and release the backend. Called once at end of input.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Output file rewritten in full on every persist.
pub struct FileStorage {
    file: File,
    path: PathBuf,
    sync: bool,
}

impl FileStorage {
    /// Create the output file. Fails if the path already exists.
    ///
    /// When `sync` is set every persist is followed by `sync_all`.
    pub fn create<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => MultisortError::OutputExists(path.to_path_buf()),
                _ => MultisortError::Io(e),
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            sync,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn persist(&mut self, content: &[u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(content)?;
        // Content only grows, but truncate anyway so the file never carries a stale tail.
        self.file.set_len(content.len() as u64)?;
        self.file.flush()?;

        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_all()?;
        Ok(())
    }
}

/// In-memory storage holding the last persisted snapshot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    content: Vec<u8>,
    persists: usize,
    closed: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last persisted content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Last persisted content as text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.content).unwrap_or_default()
    }

    /// Number of persist calls so far.
    pub fn persists(&self) -> usize {
        self.persists
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Storage for MemoryStorage {
    fn persist(&mut self, content: &[u8]) -> Result<()> {
        self.content.clear();
        self.content.extend_from_slice(content);
        self.persists += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
