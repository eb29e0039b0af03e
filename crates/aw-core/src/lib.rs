//! Core types, errors, and configuration for the aw-migration tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`MigrationConfig`] - directory layout and naming conventions
//! - [`RewriteResult`], [`FileOutcome`], [`MigrationStats`] - per-file and
//!   per-run conversion records
//! - [`ConfigError`] - configuration loading failures
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

mod config;
mod error;
mod hash;
mod types;

pub use config::MigrationConfig;
pub use error::ConfigError;
pub use hash::{fx_hash_map, fx_hash_set, FxBuildHasher, FxHashMap, FxHashSet};
pub use types::{ConversionStatus, FileError, FileOutcome, MigrationStats, RewriteResult};

/// The legacy variable-reference prefix being phased out.
pub const LEGACY_PREFIX: &str = "$vars.";

/// The target variable-reference prefix.
pub const TARGET_PREFIX: &str = "$env.";

/// File extension of workflow definition files (without the leading dot).
pub const WORKFLOW_EXTENSION: &str = "json";
