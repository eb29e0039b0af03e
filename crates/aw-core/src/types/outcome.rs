//! Per-file processing outcomes.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::rewrite::RewriteResult;

/// Whether a file's conversion left any legacy references behind.
///
/// # Examples
///
/// ```
/// use aw_core::ConversionStatus;
///
/// assert_eq!(ConversionStatus::from_remaining(0), ConversionStatus::Complete);
/// assert_eq!(ConversionStatus::from_remaining(2), ConversionStatus::Incomplete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Every legacy reference was converted.
    #[default]
    Complete,

    /// One or more legacy references remain and need manual review.
    Incomplete,
}

impl ConversionStatus {
    /// Derives the status from the number of remaining legacy references.
    #[inline]
    #[must_use]
    pub const fn from_remaining(remaining: usize) -> Self {
        if remaining == 0 {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }

    /// Returns `true` if the conversion is complete.
    #[inline]
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns a human-readable label for report output.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Incomplete => "Incomplete",
        }
    }
}

/// The full record of one successfully processed file.
///
/// Paths are relative to the migration base directory so the report reads
/// the same regardless of where the tool was invoked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// The original workflow file, relative to the base directory.
    pub original: Utf8PathBuf,

    /// The converted sibling file that was written.
    pub output: Utf8PathBuf,

    /// Counts and change ledger from the rewrite.
    pub result: RewriteResult,

    /// Whether any legacy references remain.
    pub status: ConversionStatus,
}

impl FileOutcome {
    /// Creates an outcome, deriving the status from the rewrite result.
    #[must_use]
    pub fn new(original: Utf8PathBuf, output: Utf8PathBuf, result: RewriteResult) -> Self {
        let status = ConversionStatus::from_remaining(result.remaining);
        Self {
            original,
            output,
            result,
            status,
        }
    }
}
