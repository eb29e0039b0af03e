//! Error types for the aw-migrate crate.
//!
//! This module provides the [`MigrateError`] type covering every way a
//! single file or a whole batch can fail.

use camino::Utf8PathBuf;

/// Errors that can occur during a migration run.
///
/// # Error Recovery Strategy
///
/// Per-file errors (read, parse, integrity, backup, write) are recoverable:
/// the orchestrator records them and continues with the next file. Walk and
/// configuration errors abort the batch.
///
/// # Examples
///
/// ```
/// use aw_migrate::MigrateError;
/// use std::io;
///
/// let err = MigrateError::read("wf.json", io::Error::other("denied"));
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Failed to read a source file. The file is skipped.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The original content is not valid JSON. The rewrite is never
    /// attempted on malformed input.
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        /// The file that failed validation.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The rewritten content is no longer valid JSON. Nothing is written
    /// for this file.
    #[error("conversion produced invalid JSON for {path}: {source}")]
    ConversionIntegrity {
        /// The file whose conversion corrupted the JSON structure.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Copying the original into the backup tree failed. The file is
    /// skipped before any rewrite is attempted.
    #[error("failed to back up {path}: {source}")]
    Backup {
        /// The file that couldn't be backed up.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the converted output file failed.
    #[error("failed to write output {path}: {source}")]
    Write {
        /// The output path that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed. Aborts the batch.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A path is not valid UTF-8. This workspace uses UTF-8 paths
    /// throughout.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Invalid migration setup (missing base directory, bad config).
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MigrateError {
    /// Creates a new [`MigrateError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::Parse`] error.
    #[inline]
    pub fn parse(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::ConversionIntegrity`] error.
    #[inline]
    pub fn conversion_integrity(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::ConversionIntegrity {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::Backup`] error.
    #[inline]
    pub fn backup(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::Write`] error.
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`MigrateError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this error only affects a single file and the
    /// batch can continue.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Read { .. }
                | Self::Parse { .. }
                | Self::ConversionIntegrity { .. }
                | Self::Backup { .. }
                | Self::Write { .. }
        )
    }

    /// Returns `true` if this error aborts the whole batch.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::ConversionIntegrity { path, .. }
            | Self::Backup { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::Walk(_) | Self::NonUtf8Path(_) | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_read_error_is_recoverable() {
        let err = MigrateError::read("a/wf.json", io::Error::other("denied"));
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert_eq!(err.path().map(|p| p.as_str()), Some("a/wf.json"));
        assert!(err.to_string().contains("a/wf.json"));
    }

    #[test]
    fn test_parse_error_is_recoverable() {
        let err = MigrateError::parse("a/wf.json", json_error());
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_conversion_integrity_is_recoverable() {
        let err = MigrateError::conversion_integrity("a/wf.json", json_error());
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("conversion produced invalid JSON"));
    }

    #[test]
    fn test_backup_error_is_recoverable() {
        let err = MigrateError::backup("a/wf.json", io::Error::other("full"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_error_is_fatal() {
        let err = MigrateError::config("base directory does not exist");
        assert!(err.is_fatal());
        assert!(err.path().is_none());
        assert_eq!(
            err.to_string(),
            "invalid configuration: base directory does not exist"
        );
    }

    #[test]
    fn test_non_utf8_is_fatal() {
        let err = MigrateError::NonUtf8Path(std::path::PathBuf::from("x"));
        assert!(err.is_fatal());
        assert!(err.path().is_none());
    }
}
