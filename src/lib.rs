//! multisort: stream `x y limit` tasks into an output file kept sorted by
//! the number of multiples each task produces.
//!
//! Each input line asks for every number below `limit` that is a multiple
//! of `x` or `y`. Result lines are placed at their sorted position as they
//! arrive, so the output file is complete and ordered after every line
//! without ever sorting the whole result set.
//!
//! # Features
//!
//! - **Online ordering**: an ordered index maps counts to byte offsets
//! - **Always valid output**: the file is rewritten after each record
//! - **Pluggable storage**: file or in-memory backends behind one trait
//!
//! # Example
//!
//! ```rust
//! use multisort::prelude::*;
//!
//! let cmd = MultiplesCommand::new(RunConfig::new().with_echo(false));
//! let reader = TaskReader::new("2 3 10\n5 5 12\n1 2 5\n".as_bytes());
//! let mut store = RecordWriter::new(MemoryStorage::new());
//!
//! cmd.process(reader, &mut store, &mut std::io::sink()).unwrap();
//!
//! assert_eq!(
//!     store.storage().as_str(),
//!     "12: 5 10 \n5: 1 2 3 4 \n10: 2 3 4 6 8 9 \n"
//! );
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod multiples;
pub mod storage;
pub mod task;
pub mod writer;

// Re-export commonly used types
pub use error::{MultisortError, Result};
pub use index::{LinePosition, OrderedIndex};
pub use multiples::{find_multiples, MultiplesResult};
pub use task::{Task, TaskReader};
pub use writer::{RecordWriter, SortedRecordStore};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{MultiplesCommand, RunStats};
    pub use crate::config::RunConfig;
    pub use crate::error::{MultisortError, Result};
    pub use crate::multiples::{find_multiples, MultiplesResult};
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
    pub use crate::task::{Task, TaskReader};
    pub use crate::writer::{RecordWriter, SortedRecordStore};
}
