//! Multiples command: stream tasks into a count-sorted output file.
//!
//! For each `x y limit` line the multiples are computed, echoed to the
//! live channel in input order, and committed to the sorted record store.
//! The output is rewritten after every line, so it is valid and ordered by
//! count at any point of the run, even for unbounded input.

use crate::config::RunConfig;
use crate::error::{MultisortError, Result};
use crate::multiples::find_multiples;
use crate::storage::FileStorage;
use crate::task::TaskReader;
use crate::writer::{RecordWriter, SortedRecordStore};
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Statistics from a run.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub lines_read: usize,
    pub records_committed: usize,
    pub output_bytes: usize,
    pub max_count: u64,
    pub elapsed: Duration,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lines: {}, Records: {}, Output bytes: {}, Max count: {}, Time: {:.3}s",
            self.lines_read,
            self.records_committed,
            self.output_bytes,
            self.max_count,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Multiples command configuration.
#[derive(Debug, Clone, Default)]
pub struct MultiplesCommand {
    pub config: RunConfig,
}

impl MultiplesCommand {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run on an input file, creating `output`.
    ///
    /// Preconditions are checked before the input is opened: the input must
    /// exist and the output must not.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
        &self,
        input: P,
        output: Q,
        live: &mut W,
    ) -> Result<RunStats> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.exists() {
            return Err(MultisortError::MissingInput(input.to_path_buf()));
        }
        if output.exists() {
            return Err(MultisortError::OutputExists(output.to_path_buf()));
        }

        let storage = FileStorage::create(output, self.config.sync)?;
        let reader = TaskReader::from_path(input, self.config.input_buffer)?;

        info!(
            "Sorting multiples from {} into {}",
            input.display(),
            storage.path().display()
        );

        let mut store = RecordWriter::new(storage);
        let stats = self.process(reader, &mut store, live)?;

        info!("Finished: {}", stats);
        Ok(stats)
    }

    /// Drive tasks from `reader` into `store`, one line at a time.
    ///
    /// Stops at the first malformed line without reading further input;
    /// records committed before it stay in the store. The store is
    /// finished only when the input is exhausted.
    pub fn process<R: Read, S: SortedRecordStore, W: Write>(
        &self,
        reader: TaskReader<R>,
        store: &mut S,
        live: &mut W,
    ) -> Result<RunStats> {
        let start = Instant::now();
        let mut stats = RunStats::default();

        for task in reader.tasks() {
            let task = task?;
            stats.lines_read += 1;

            let result = find_multiples(task.x, task.y, task.limit);
            let line = result.line();

            if self.config.echo {
                live.write_all(line.as_bytes())?;
            }

            store.commit(&line, result.count)?;
            stats.records_committed += 1;
            stats.output_bytes += line.len();
            stats.max_count = stats.max_count.max(result.count);
        }

        live.flush()?;
        store.finish()?;

        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn quiet() -> MultiplesCommand {
        MultiplesCommand::new(RunConfig::new().with_echo(false))
    }

    #[test]
    fn test_output_sorted_by_count() {
        let cmd = MultiplesCommand::default();
        let reader = TaskReader::new("2 3 10\n5 5 12\n1 2 5\n".as_bytes());
        let mut store = RecordWriter::new(MemoryStorage::new());
        let mut live: Vec<u8> = Vec::new();

        let stats = cmd.process(reader, &mut store, &mut live).unwrap();

        assert_eq!(
            store.storage().as_str(),
            "12: 5 10 \n5: 1 2 3 4 \n10: 2 3 4 6 8 9 \n"
        );
        assert_eq!(
            String::from_utf8(live).unwrap(),
            "10: 2 3 4 6 8 9 \n12: 5 10 \n5: 1 2 3 4 \n"
        );
        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.records_committed, 3);
        assert_eq!(stats.max_count, 6);
        assert_eq!(stats.output_bytes, store.bytes_written());
        assert!(store.storage().is_closed());
    }

    #[test]
    fn test_quiet_skips_live_channel() {
        let reader = TaskReader::new("3 5 16\n".as_bytes());
        let mut store = RecordWriter::new(MemoryStorage::new());
        let mut live: Vec<u8> = Vec::new();

        quiet().process(reader, &mut store, &mut live).unwrap();

        assert!(live.is_empty());
        assert_eq!(store.storage().as_str(), "16: 3 5 6 9 10 12 15 \n");
    }

    #[test]
    fn test_malformed_line_keeps_committed_records() {
        let reader = TaskReader::new("2 3 10\na 1 2\n1 2 5\n".as_bytes());
        let mut store = RecordWriter::new(MemoryStorage::new());
        let mut live: Vec<u8> = Vec::new();

        let err = quiet().process(reader, &mut store, &mut live).unwrap_err();

        assert_eq!(err.line(), Some(2));
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().as_str(), "10: 2 3 4 6 8 9 \n");
        assert_eq!(store.storage().persists(), 1);
        assert!(!store.storage().is_closed());
    }

    #[test]
    fn test_empty_input() {
        let reader = TaskReader::new("".as_bytes());
        let mut store = RecordWriter::new(MemoryStorage::new());
        let mut live: Vec<u8> = Vec::new();

        let stats = quiet().process(reader, &mut store, &mut live).unwrap();

        assert_eq!(stats.lines_read, 0);
        assert_eq!(store.storage().persists(), 0);
        assert!(store.storage().is_closed());
    }

    #[test]
    fn test_run_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "2 3 10\n").unwrap();
        std::fs::write(&output, "previous\n").unwrap();

        let err = quiet().run(&input, &output, &mut std::io::sink()).unwrap_err();

        assert!(matches!(err, MultisortError::OutputExists(_)));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.txt");
        let output = dir.path().join("out.txt");

        let err = quiet().run(&input, &output, &mut std::io::sink()).unwrap_err();

        assert!(matches!(err, MultisortError::MissingInput(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "3 5 16\n4 4 9\n7 11 3\n").unwrap();

        let stats = quiet().run(&input, &output, &mut std::io::sink()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "3: \n9: 4 8 \n16: 3 5 6 9 10 12 15 \n"
        );
        assert_eq!(stats.records_committed, 3);
        assert_eq!(stats.output_bytes, 34);
        assert!(stats.to_string().starts_with("Lines: 3, Records: 3"));
    }
}
