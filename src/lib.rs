//! A polling tail library that streams newly appended lines from a growing
//! text file.
//!
//! No filesystem notifications are used: on every tick the file is reopened
//! with shared read access and scanned backward from end-of-file until the
//! last previously seen line is found, so concurrent writers are never
//! blocked and the file may even be replaced between polls.
//!
//! # Example
//!
//! ```rust,no_run
//! use log_tail::{TailConfig, tail_log};
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = tail_log("app.log", TailConfig::default()).await?;
//!
//!     while let Some(line) = stream.next().await {
//!         match line {
//!             Ok(line) => println!("{}", line),
//!             Err(e) => eprintln!("poll failed: {}", e),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod config;
mod delta;
mod error;
mod scanner;
mod tail;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use config::{StartMode, TailConfig};
pub use error::{Error, Result};
pub use tail::{TailStream, Tailer, TailerStatus};

use std::path::Path;

/// Starts tailing a file and returns the stream of newly appended lines.
///
/// Convenience wrapper over [`Tailer`] for callers that do not need the
/// stop/restart surface: the loop runs until the returned stream is
/// dropped.
///
/// # Example
///
/// ```rust,no_run
/// use log_tail::{StartMode, TailConfig, tail_log};
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = TailConfig::default().with_mode(StartMode::ReplayFromStart);
///     let mut stream = tail_log("app.log", config).await?;
///
///     while let Some(line) = stream.next().await {
///         println!("{}", line?);
///     }
///
///     Ok(())
/// }
/// ```
pub async fn tail_log<P: AsRef<Path>>(path: P, config: TailConfig) -> Result<TailStream> {
    let mut tailer = Tailer::new(path, config);
    tailer.start().await
}
