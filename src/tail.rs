//! The poll loop, its control surface, and the line stream handed to
//! subscribers.

use crate::config::{StartMode, TailConfig};
use crate::delta::{TailState, compute_delta};
use crate::error::{Error, Result};
use futures::Stream;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Lifecycle of a [`Tailer`]. `Stopped` is terminal for the running loop;
/// a fresh `start()` moves back through `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailerStatus {
    Idle,
    Running,
    Stopped,
}

/// Polls a file at a fixed interval and streams newly appended lines.
///
/// Each tailer drives exactly one file from one spawned task; state is
/// touched only by that task, so there is no internal locking. The file is
/// reopened on every iteration and never held across the interval wait.
pub struct Tailer {
    path: PathBuf,
    config: TailConfig,
    status: TailerStatus,
    shutdown_tx: Option<broadcast::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Tailer {
    /// Creates an idle tailer for `path`. Nothing happens until `start()`.
    pub fn new<P: AsRef<Path>>(path: P, config: TailConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            status: TailerStatus::Idle,
            shutdown_tx: None,
            task: None,
        }
    }

    /// Starts the poll loop and returns the stream of new lines.
    ///
    /// In [`StartMode::FollowFromNow`] the baseline scan runs here, before
    /// the loop is spawned; if the file cannot be read at that point the
    /// error is [`Error::Baseline`] and the tailer stays idle. Calling
    /// `start()` while already running returns [`Error::AlreadyRunning`].
    /// Starting again after `stop()` re-establishes a fresh baseline.
    pub async fn start(&mut self) -> Result<TailStream> {
        if self.status() == TailerStatus::Running {
            return Err(Error::AlreadyRunning);
        }

        let state = match self.config.mode {
            StartMode::FollowFromNow => {
                // Scan once and discard the delta; only the baseline is kept.
                let (_, state) = compute_delta(&self.path, &TailState::default())
                    .await
                    .map_err(Error::into_baseline)?;
                state
            }
            StartMode::ReplayFromStart => TailState::default(),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        debug!(path = %self.path.display(), mode = ?self.config.mode, "starting tail loop");
        let task = tokio::spawn(poll_task(
            self.path.clone(),
            self.config.clone(),
            state,
            tx,
            shutdown_rx,
        ));

        self.task = Some(task);
        self.status = TailerStatus::Running;

        let stream_shutdown = shutdown_tx.clone();
        self.shutdown_tx = Some(shutdown_tx);

        Ok(TailStream {
            receiver: rx,
            shutdown_tx: stream_shutdown,
        })
    }

    /// Requests cooperative cancellation of the poll loop.
    ///
    /// The loop observes the request at its next suspension point; a delta
    /// already computed in the same iteration is discarded, not emitted.
    pub fn stop(&mut self) {
        if let Some(tx) = &self.shutdown_tx {
            let _ = tx.send(());
        }
        if self.status == TailerStatus::Running {
            self.status = TailerStatus::Stopped;
        }
    }

    /// Stops the loop and releases the task and channel handles.
    pub fn dispose(&mut self) {
        self.stop();
        self.shutdown_tx = None;
        self.task = None;
    }

    /// Current lifecycle state. A loop that terminated on its own (for
    /// example because the subscriber was dropped) reports `Stopped`.
    pub fn status(&self) -> TailerStatus {
        match self.status {
            TailerStatus::Running
                if self.task.as_ref().is_some_and(JoinHandle::is_finished) =>
            {
                TailerStatus::Stopped
            }
            status => status,
        }
    }

    /// The file being tailed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A stream of newly appended lines, one item per line in append order.
///
/// Dropping the stream signals the poll loop to shut down.
pub struct TailStream {
    receiver: mpsc::UnboundedReceiver<Result<String>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Stream for TailStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

impl Drop for TailStream {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Background task: wait, check cancellation, scan, emit. The file handle
/// is scoped to `compute_delta`, never held across the wait.
async fn poll_task(
    path: PathBuf,
    config: TailConfig,
    mut state: TailState,
    tx: mpsc::UnboundedSender<Result<String>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!(path = %path.display(), "tail loop cancelled");
                break;
            }
            _ = tokio::time::sleep(config.interval) => {}
        }

        match compute_delta(&path, &state).await {
            Ok((delta, next_state)) => {
                state = next_state;

                // Cancellation observed after the scan still suppresses
                // emission of the delta computed in this iteration.
                if !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
                    debug!(path = %path.display(), "tail loop cancelled");
                    break;
                }

                if delta.is_empty() {
                    continue;
                }

                debug!(path = %path.display(), lines = delta.len(), "emitting new lines");
                for line in delta {
                    if tx.send(Ok(line)).is_err() {
                        // Subscriber gone; nothing left to deliver to.
                        return;
                    }
                }
            }
            Err(e) => {
                // Access errors after the baseline are local to one
                // iteration; surface them and retry on the next tick.
                warn!(path = %path.display(), error = %e, "poll iteration failed");
                if tx.send(Err(e)).is_err() {
                    return;
                }
            }
        }
    }
}
