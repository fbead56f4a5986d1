//! Error types for the tailing library.

use thiserror::Error;

/// The main error type for tail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be opened or read during a poll iteration.
    /// Non-fatal: the loop skips the iteration and retries on the next tick.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be read while establishing the initial baseline.
    /// Fatal: there is no prior state to fall back on.
    #[error("failed to establish tail baseline: {0}")]
    Baseline(#[source] std::io::Error),

    /// `start()` was called on a tailer that is already running.
    #[error("tailer is already running")]
    AlreadyRunning,
}

impl Error {
    /// Reclassifies an access error raised during the baseline scan.
    pub(crate) fn into_baseline(self) -> Self {
        match self {
            Error::Io(io) => Error::Baseline(io),
            other => other,
        }
    }
}

/// A convenient Result type for tail operations.
pub type Result<T> = std::result::Result<T, Error>;
