//! Baseline tracking and per-poll delta computation.

use crate::error::Result;
use crate::scanner::previous_line;
use std::path::Path;
use tokio::fs::File;

/// The baseline separating already-reported content from new content.
///
/// Only the text of the most recently seen line is kept; matching is exact
/// string equality. When two adjacent lines are textually identical the
/// scan can stop one line early and skip the duplicate — a documented
/// limitation of the matching rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TailState {
    pub(crate) last_line: Option<String>,
}

/// Scans `path` backward from end-of-file and returns the lines appended
/// since `state`'s baseline, oldest first, along with the updated state.
///
/// A fresh read handle is opened per call and released before returning, so
/// concurrent writers are never blocked and replacing the file between
/// calls cannot wedge the caller. If start-of-file is reached without a
/// baseline match (first run, or the file was swapped/truncated), the whole
/// content is the delta.
pub(crate) async fn compute_delta(
    path: &Path,
    state: &TailState,
) -> Result<(Vec<String>, TailState)> {
    let mut file = File::open(path).await?;
    let len = file.metadata().await?.len();

    if len == 0 {
        return Ok((Vec::new(), state.clone()));
    }

    let mut cursor = len;
    let mut delta = Vec::new();

    loop {
        let (line, next) = previous_line(&mut file, cursor).await?;

        if state.last_line.as_deref() == Some(line.as_str()) {
            break;
        }

        delta.push(line);

        if next == 0 {
            break;
        }
        cursor = next;
    }

    // Accumulated newest-first; the subscriber wants chronological order.
    delta.reverse();

    let new_state = match delta.last() {
        Some(newest) => TailState {
            last_line: Some(newest.clone()),
        },
        None => state.clone(),
    };

    Ok((delta, new_state))
}
