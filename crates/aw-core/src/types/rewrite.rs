//! Per-file rewrite results.

use serde::{Deserialize, Serialize};

use crate::hash::FxHashSet;

/// The outcome of rewriting one file's text.
///
/// Produced by the pattern rewriter and never modified afterwards.
///
/// Note that `converted` counts substitutions across all rewrite passes and
/// can exceed `found` when a later pass re-touches text an earlier pass
/// produced. `remaining` is always recomputed by re-scanning the output
/// text, so it is the authoritative completeness signal.
///
/// # Examples
///
/// ```
/// use aw_core::RewriteResult;
///
/// let mut result = RewriteResult::new(1);
/// result.record("API_URL", "{{$vars.API_URL}} → {{$env.API_URL}}".to_owned());
/// assert_eq!(result.converted, 1);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    /// Raw `$vars.` occurrences in the original text, counted before any pass.
    pub found: usize,

    /// Substitutions performed across all passes.
    pub converted: usize,

    /// `$vars.` occurrences left in the output text after all passes.
    pub remaining: usize,

    /// Human-readable description of each substitution, in pass order.
    pub changes: Vec<String>,

    /// Distinct variable names touched by any substitution.
    pub variables: FxHashSet<String>,
}

impl RewriteResult {
    /// Creates a result with the given pre-pass occurrence count.
    #[must_use]
    pub fn new(found: usize) -> Self {
        Self {
            found,
            ..Self::default()
        }
    }

    /// Records one substitution: increments the converted counter, notes the
    /// variable name, and appends a ledger entry.
    pub fn record(&mut self, variable: &str, change: String) {
        self.converted += 1;
        self.variables.insert(variable.to_owned());
        self.changes.push(change);
    }

    /// Returns `true` if no legacy references remain in the output text.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}
