//! Single-file conversion.
//!
//! [`FileTransformer`] takes one workflow file from text to converted
//! sibling: read, validate JSON shape, rewrite, re-validate, write. The
//! JSON parses are validity checks only; the rewrite operates on raw text
//! and the parsed values are discarded.

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::IgnoredAny;
use tracing::debug;

use aw_core::{FileOutcome, WORKFLOW_EXTENSION};

use crate::error::MigrateError;

/// Converts one workflow file and writes the result to a derived sibling
/// path.
///
/// The output path inserts the configured suffix before the extension
/// (`wf.json` becomes `wf_env.json`, same directory). The original file is
/// never deleted or overwritten.
#[derive(Debug)]
pub struct FileTransformer {
    /// Base directory used to relativize paths in outcomes.
    base_dir: Utf8PathBuf,
    /// Suffix inserted before the extension of output files.
    output_suffix: String,
}

impl FileTransformer {
    /// Creates a transformer for the given base directory and suffix.
    #[must_use]
    pub fn new(base_dir: &Utf8Path, output_suffix: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.to_owned(),
            output_suffix: output_suffix.into(),
        }
    }

    /// Converts one file end to end and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Read`] if the file cannot be read,
    /// [`MigrateError::Parse`] if the original is not valid JSON,
    /// [`MigrateError::ConversionIntegrity`] if the rewritten text fails
    /// JSON validation (nothing is written in that case), or
    /// [`MigrateError::Write`] if the output file cannot be written.
    pub fn transform(&self, path: &Utf8Path) -> Result<FileOutcome, MigrateError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MigrateError::read(path, e))?;

        validate_json(&content).map_err(|e| MigrateError::parse(path, e))?;

        let (rewritten, result) = aw_rewrite::rewrite(&content);

        validate_json(&rewritten).map_err(|e| MigrateError::conversion_integrity(path, e))?;

        let output = self.output_path(path);
        std::fs::write(&output, &rewritten).map_err(|e| MigrateError::write(&output, e))?;

        debug!(
            file = %path,
            output = %output,
            converted = result.converted,
            remaining = result.remaining,
            "Converted workflow"
        );

        Ok(FileOutcome::new(
            self.relative(path),
            self.relative(&output),
            result,
        ))
    }

    /// Derives the output path: same directory, suffix inserted before the
    /// extension.
    fn output_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        let stem = path.file_stem().unwrap_or("workflow");
        path.with_file_name(format!(
            "{stem}{}.{WORKFLOW_EXTENSION}",
            self.output_suffix
        ))
    }

    /// Relativizes a path against the base directory for display.
    fn relative(&self, path: &Utf8Path) -> Utf8PathBuf {
        path.strip_prefix(&self.base_dir).unwrap_or(path).to_owned()
    }
}

/// Checks that `text` is well-formed JSON without building a value tree.
fn validate_json(text: &str) -> Result<(), serde_json::Error> {
    serde_json::from_str::<IgnoredAny>(text).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_core::ConversionStatus;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        (dir, base)
    }

    #[test]
    fn test_transform_writes_converted_sibling() {
        let (_dir, base) = setup();
        let original = base.join("wf.json");
        fs::write(&original, r#"{"url": "{{$vars.API_URL}}"}"#).unwrap();

        let transformer = FileTransformer::new(&base, "_env");
        let outcome = transformer.transform(&original).unwrap();

        assert_eq!(outcome.original, "wf.json");
        assert_eq!(outcome.output, "wf_env.json");
        assert_eq!(outcome.status, ConversionStatus::Complete);
        assert_eq!(outcome.result.found, 1);

        let written = fs::read_to_string(base.join("wf_env.json")).unwrap();
        assert_eq!(written, r#"{"url": "{{$env.API_URL}}"}"#);
        // Original untouched
        assert_eq!(
            fs::read_to_string(&original).unwrap(),
            r#"{"url": "{{$vars.API_URL}}"}"#
        );
    }

    #[test]
    fn test_transform_rejects_invalid_json() {
        let (_dir, base) = setup();
        let original = base.join("broken.json");
        fs::write(&original, "{not json").unwrap();

        let transformer = FileTransformer::new(&base, "_env");
        let err = transformer.transform(&original).unwrap_err();

        assert!(matches!(err, MigrateError::Parse { .. }));
        assert!(!base.join("broken_env.json").exists());
    }

    #[test]
    fn test_transform_missing_file_is_read_error() {
        let (_dir, base) = setup();
        let transformer = FileTransformer::new(&base, "_env");
        let err = transformer.transform(&base.join("absent.json")).unwrap_err();
        assert!(matches!(err, MigrateError::Read { .. }));
    }

    #[test]
    fn test_transform_no_references_still_writes_output() {
        let (_dir, base) = setup();
        let original = base.join("plain.json");
        fs::write(&original, r#"{"name": "no vars here"}"#).unwrap();

        let transformer = FileTransformer::new(&base, "_env");
        let outcome = transformer.transform(&original).unwrap();

        assert_eq!(outcome.result.found, 0);
        assert_eq!(outcome.status, ConversionStatus::Complete);
        assert!(base.join("plain_env.json").exists());
    }

    #[test]
    fn test_output_path_inserts_suffix_before_extension() {
        let transformer = FileTransformer::new(Utf8Path::new("."), "_env");
        assert_eq!(
            transformer.output_path(Utf8Path::new("a/b/lead_intake.json")),
            Utf8PathBuf::from("a/b/lead_intake_env.json")
        );
    }
}
