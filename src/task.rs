//! Streaming reader for `x y limit` task files.

use crate::error::{MultisortError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::num::NonZeroU64;
use std::path::Path;
use tracing::trace;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub x: NonZeroU64,
    pub y: NonZeroU64,
    pub limit: i64,
}

/// A streaming task file reader.
///
/// Reads one line at a time; nothing beyond the current line is buffered
/// apart from the underlying `BufReader`.
pub struct TaskReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl TaskReader<File> {
    /// Open a task file from a path with the given input buffer capacity.
    pub fn from_path<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::with_capacity(file, capacity))
    }
}

impl<R: Read> TaskReader<R> {
    /// Create a new task reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::with_capacity(64),
        }
    }

    /// Create a task reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(64),
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next task, or `None` at end of input.
    pub fn read_task(&mut self) -> Result<Option<Task>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = std::str::from_utf8(&self.buffer).map_err(|_| MultisortError::Parse {
            line: self.line_number,
            message: "line is not valid UTF-8".to_string(),
        })?;
        let line = line.trim_end_matches(['\n', '\r']);
        let task = parse_task(line, self.line_number)?;
        trace!("Line {}: {:?}", self.line_number, task);
        Ok(Some(task))
    }

    /// Get an iterator over all tasks.
    pub fn tasks(self) -> TaskIter<R> {
        TaskIter { reader: self }
    }
}

/// Parse a single `x y limit` line.
///
/// `line_number` is only used for diagnostics.
pub fn parse_task(line: &str, line_number: usize) -> Result<Task> {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();

    let numbers = tokens
        .iter()
        .map(|token| {
            token.parse::<i64>().map_err(|_| MultisortError::Parse {
                line: line_number,
                message: format!("expected only numbers, got '{}'", token),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let [x, y, limit] = numbers[..] else {
        return Err(MultisortError::Parse {
            line: line_number,
            message: format!("expected 3 numbers, got {}", numbers.len()),
        });
    };
    Ok(Task {
        x: parse_step(x, "x", line_number)?,
        y: parse_step(y, "y", line_number)?,
        limit,
    })
}

fn parse_step(value: i64, name: &str, line_number: usize) -> Result<NonZeroU64> {
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| MultisortError::Parse {
            line: line_number,
            message: format!("{} must be a positive number, got {}", name, value),
        })
}

/// Iterator over tasks.
pub struct TaskIter<R: Read> {
    reader: TaskReader<R>,
}

impl<R: Read> Iterator for TaskIter<R> {
    type Item = Result<Task>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_task() {
            Ok(Some(task)) => Some(Ok(task)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse tasks from a string (useful for testing).
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    TaskReader::new(content.as_bytes()).tasks().collect()
}
