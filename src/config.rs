//! Tail configuration.

use std::time::Duration;

/// How the first poll treats content already present in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartMode {
    /// Establish the baseline silently on start; only lines appended
    /// afterwards are ever reported.
    #[default]
    FollowFromNow,
    /// Report the entire current file content as the first delta.
    ReplayFromStart,
}

/// Options for a [`Tailer`](crate::Tailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailConfig {
    /// Time between polls.
    pub interval: Duration,
    /// Initialization mode.
    pub mode: StartMode,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            mode: StartMode::default(),
        }
    }
}

impl TailConfig {
    /// Returns a config with the given poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns a config with the given start mode.
    pub fn with_mode(mut self, mode: StartMode) -> Self {
        self.mode = mode;
        self
    }
}
