//! Runtime configuration for a sorting run.
//!
//! Everything a run needs is carried in [`RunConfig`] and handed to the
//! command explicitly; there is no process-wide state.

/// Default input buffer size (64 KB).
/// Task lines are short, so a small buffer keeps reads cheap.
pub const DEFAULT_INPUT_BUFFER: usize = 64 * 1024;

/// Options controlling one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Echo every rendered line to the live channel in input order.
    pub echo: bool,
    /// `sync_all` the output file after every commit.
    pub sync: bool,
    /// Report run statistics on completion.
    pub stats: bool,
    /// Capacity of the input `BufReader`.
    pub input_buffer: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            echo: true,
            sync: false,
            stats: false,
            input_buffer: DEFAULT_INPUT_BUFFER,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_input_buffer(mut self, capacity: usize) -> Self {
        self.input_buffer = capacity.max(1);
        self
    }
}
