//! Pure text rewriter converting `$vars.NAME` references to `$env.NAME`.
//!
//! This crate is the conversion engine for the aw-migration tool. It is
//! deliberately free of I/O: text goes in, rewritten text and a
//! [`RewriteResult`] ledger come out, and callers decide where the bytes
//! live.
//!
//! # Overview
//!
//! Conversion is six ordered passes over the text, each pass feeding the
//! next. The passes handle, in order:
//!
//! 1. Simple delimited references: `{{$vars.NAME}}`
//! 2. Compound delimited expressions: `{{ ... $vars.NAME ... }}`
//! 3. Occurrences inside double-quoted strings
//! 4. Redundant fallbacks: `$vars.A || $env.B` collapses to `$env.B`
//! 5. Bare occurrences in embedded script text
//! 6. Whitespace-preceded occurrences the adjacency guard of pass 5 skipped
//!
//! The rewriter is textual, not expression-aware: passes are independent
//! regex sweeps, so `converted` counts substitutions rather than distinct
//! source tokens and can exceed `found`. The `remaining` count is always
//! recomputed from the final text and is the authoritative signal.
//!
//! # Idempotence
//!
//! Once a text is fully converted (`remaining == 0`), re-running the
//! rewriter returns it unchanged with `found == 0`.
//!
//! # Example
//!
//! ```
//! use aw_rewrite::rewrite;
//!
//! let (output, result) = rewrite(r#"{"url": "{{$vars.API_URL}}"}"#);
//! assert_eq!(output, r#"{"url": "{{$env.API_URL}}"}"#);
//! assert_eq!(result.found, 1);
//! assert_eq!(result.remaining, 0);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod passes;

use aw_core::{RewriteResult, LEGACY_PREFIX};

/// Counts raw `$vars.` occurrences in a text.
///
/// Used both for the pre-pass `found` count and the post-pass `remaining`
/// count.
#[must_use]
pub fn count_legacy_refs(text: &str) -> usize {
    text.matches(LEGACY_PREFIX).count()
}

/// Rewrites every `$vars.NAME` reference in `text` to `$env.NAME`.
///
/// Applies the six conversion passes in order and returns the rewritten
/// text together with the change ledger. Texts containing no legacy
/// references are returned unchanged with an all-zero result.
#[must_use]
pub fn rewrite(text: &str) -> (String, RewriteResult) {
    let mut result = RewriteResult::new(count_legacy_refs(text));

    if result.found == 0 {
        return (text.to_owned(), result);
    }

    let output = passes::apply_all(text, &mut result);
    result.remaining = count_legacy_refs(&output);

    (output, result)
}
