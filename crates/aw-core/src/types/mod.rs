//! Domain types for the aw-migration tool.
//!
//! - [`RewriteResult`] - per-file conversion counts and change ledger
//! - [`FileOutcome`] / [`ConversionStatus`] - per-file processing outcome
//! - [`MigrationStats`] / [`FileError`] - per-run accumulator

mod outcome;
mod rewrite;
mod stats;

pub use outcome::{ConversionStatus, FileOutcome};
pub use rewrite::RewriteResult;
pub use stats::{FileError, MigrationStats};
