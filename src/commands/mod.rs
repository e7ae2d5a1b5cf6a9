//! Command implementations for multisort.

pub mod multiples;

pub use multiples::{MultiplesCommand, RunStats};
