//! Run-level statistics.
//!
//! [`MigrationStats`] is an owned accumulator the orchestrator threads
//! through a run and returns to the caller. It is mutated once per file by
//! a single thread of control; there is no shared or global state.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::outcome::FileOutcome;
use crate::hash::FxHashSet;

/// A file that was skipped, with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// The file that failed, relative to the base directory.
    pub file: Utf8PathBuf,
    /// Human-readable error description.
    pub message: String,
}

/// Accumulated statistics for one migration run.
///
/// # Examples
///
/// ```
/// use aw_core::{FileOutcome, MigrationStats, RewriteResult};
/// use camino::Utf8PathBuf;
///
/// let mut stats = MigrationStats::default();
/// stats.total_files = 1;
/// stats.record_outcome(FileOutcome::new(
///     Utf8PathBuf::from("wf.json"),
///     Utf8PathBuf::from("wf_env.json"),
///     RewriteResult::new(0),
/// ));
/// assert_eq!(stats.processed_files, 1);
/// assert!(stats.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    /// Candidate workflow files discovered across all roots.
    pub total_files: usize,

    /// Files processed end to end (backed up, rewritten, written out).
    pub processed_files: usize,

    /// Files skipped because backup or transformation failed.
    pub skipped_files: usize,

    /// Per-file outcomes, in discovery order.
    pub outcomes: Vec<FileOutcome>,

    /// Per-file failures, in discovery order.
    pub errors: Vec<FileError>,
}

impl MigrationStats {
    /// Records a successfully processed file.
    pub fn record_outcome(&mut self, outcome: FileOutcome) {
        self.processed_files += 1;
        self.outcomes.push(outcome);
    }

    /// Records a skipped file and the reason it failed.
    pub fn record_error(&mut self, file: Utf8PathBuf, message: String) {
        self.skipped_files += 1;
        self.errors.push(FileError { file, message });
    }

    /// Total legacy references found across all processed files.
    #[must_use]
    pub fn total_found(&self) -> usize {
        self.outcomes.iter().map(|o| o.result.found).sum()
    }

    /// Total substitutions performed across all processed files.
    #[must_use]
    pub fn total_converted(&self) -> usize {
        self.outcomes.iter().map(|o| o.result.converted).sum()
    }

    /// Total legacy references remaining across all processed files.
    #[must_use]
    pub fn total_remaining(&self) -> usize {
        self.outcomes.iter().map(|o| o.result.remaining).sum()
    }

    /// Distinct variable names renamed anywhere in the run.
    #[must_use]
    pub fn distinct_variables(&self) -> FxHashSet<&str> {
        self.outcomes
            .iter()
            .flat_map(|o| o.result.variables.iter())
            .map(String::as_str)
            .collect()
    }

    /// Returns `true` if no processed file has legacy references left.
    ///
    /// Skipped files do not affect completeness; they are surfaced through
    /// [`errors`](Self::errors) instead.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_remaining() == 0
    }
}
