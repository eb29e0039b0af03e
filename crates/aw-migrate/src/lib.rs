//! File discovery, backup, and batch conversion for workflow files.
//!
//! This crate is the pipeline around the pure rewriter in `aw-rewrite`:
//!
//! - [`WorkflowWalker`]: recursive discovery of candidate `.json` files
//! - [`BackupManager`]: pre-mutation copies into a mirrored backup tree
//! - [`FileTransformer`]: per-file read, validate, rewrite, write
//! - [`Migrator`]: the orchestrator composing the above over all roots
//!
//! # Architecture
//!
//! ```text
//! Migrator (batch orchestrator)
//!     │
//!     ├── WorkflowWalker (collect paths per root)
//!     ├── BackupManager  (copy original before mutation)
//!     ├── FileTransformer (read → validate → rewrite → write)
//!     └── MigrationStats (owned accumulator, returned to caller)
//! ```
//!
//! # Failure Model
//!
//! Processing is strictly sequential: each file is backed up, converted,
//! and written before the next begins. A failure at any per-file step is
//! recorded and the batch continues; there are no retries and no rollback.
//! Only walk and configuration errors abort the run.
//!
//! # Example
//!
//! ```ignore
//! use aw_core::MigrationConfig;
//! use aw_migrate::Migrator;
//! use camino::Utf8Path;
//!
//! let migrator = Migrator::new(Utf8Path::new("."), MigrationConfig::default())?;
//! let stats = migrator.run()?;
//! println!("Processed {}/{} files", stats.processed_files, stats.total_files);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod backup;
mod error;
mod transformer;
mod walker;

pub use backup::BackupManager;
pub use error::MigrateError;
pub use transformer::FileTransformer;
pub use walker::WorkflowWalker;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use aw_core::{MigrationConfig, MigrationStats};

/// The batch orchestrator: scans all configured roots and converts every
/// discovered workflow file.
///
/// Per-file lifecycle: Discovered → Backed-up → Transformed (Complete or
/// Incomplete), or Failed at either step. Failed files are recorded in the
/// returned statistics and never stop the batch.
#[derive(Debug)]
pub struct Migrator {
    /// Base directory the module directories live under.
    base_dir: Utf8PathBuf,
    /// Directory layout and naming conventions.
    config: MigrationConfig,
}

impl Migrator {
    /// Creates a migrator rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Config`] if the configuration is invalid or
    /// the base directory does not exist.
    pub fn new(base_dir: &Utf8Path, config: MigrationConfig) -> Result<Self, MigrateError> {
        config
            .validate()
            .map_err(|e| MigrateError::config(e.to_string()))?;

        if !base_dir.exists() {
            return Err(MigrateError::config(format!(
                "base directory does not exist: {base_dir}"
            )));
        }
        if !base_dir.is_dir() {
            return Err(MigrateError::config(format!(
                "base path is not a directory: {base_dir}"
            )));
        }

        Ok(Self {
            base_dir: base_dir.to_owned(),
            config,
        })
    }

    /// Discovers all candidate workflow files across the configured module
    /// directories, in deterministic order.
    ///
    /// A missing module directory contributes nothing and logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Walk`] if traversal of an existing directory
    /// fails.
    pub fn discover(&self) -> Result<Vec<Utf8PathBuf>, MigrateError> {
        let mut files = Vec::new();

        for dir in &self.config.directories {
            let root = self.base_dir.join(dir);
            info!(root = %root, "Scanning directory");

            let walker = WorkflowWalker::new(&root, &self.config);
            let paths = walker.collect_paths()?;
            info!(root = %root, count = paths.len(), "Collected workflow files");

            files.extend(paths);
        }

        Ok(files)
    }

    /// Runs the full migration batch and returns the accumulated
    /// statistics.
    ///
    /// For each discovered file, in discovery order: back up, then
    /// transform. Any per-file failure is recorded as a skip and the batch
    /// continues. Successfully processed files stay processed even if
    /// later files fail.
    ///
    /// # Errors
    ///
    /// Only failures outside the per-file loop are returned: invalid
    /// setup, or a directory walk error.
    pub fn run(&self) -> Result<MigrationStats, MigrateError> {
        let files = self.discover()?;

        let mut stats = MigrationStats {
            total_files: files.len(),
            ..MigrationStats::default()
        };

        if files.is_empty() {
            warn!("No workflow files found to process");
            return Ok(stats);
        }

        info!(total = stats.total_files, "Starting migration batch");

        let backups = BackupManager::new(&self.base_dir, self.config.backup_dir.clone());
        let transformer =
            FileTransformer::new(&self.base_dir, self.config.output_suffix.clone());

        for path in &files {
            let relative = self.relative(path);
            info!(file = %relative, "Processing workflow");

            // Backup precedes the JSON validity check, so even a malformed
            // original is preserved before anything else happens.
            let step = backups
                .backup(path)
                .and_then(|_| transformer.transform(path));

            match step {
                Ok(outcome) => {
                    if outcome.result.remaining > 0 {
                        warn!(
                            file = %relative,
                            remaining = outcome.result.remaining,
                            "Legacy references could not be converted"
                        );
                    }
                    stats.record_outcome(outcome);
                }
                Err(e) => {
                    warn!(file = %relative, error = %e, "Skipping file");
                    stats.record_error(relative, e.to_string());
                }
            }
        }

        info!(
            processed = stats.processed_files,
            skipped = stats.skipped_files,
            remaining = stats.total_remaining(),
            "Migration batch finished"
        );

        Ok(stats)
    }

    /// Returns the base directory for this run.
    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Returns the migration configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Relativizes a path against the base directory for logs and stats.
    fn relative(&self, path: &Utf8Path) -> Utf8PathBuf {
        path.strip_prefix(&self.base_dir).unwrap_or(path).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_core::ConversionStatus;
    use std::fs;

    fn setup_base() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        (dir, base)
    }

    fn config_for(dirs: &[&str]) -> MigrationConfig {
        MigrationConfig {
            directories: dirs.iter().map(ToString::to_string).collect(),
            ..MigrationConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_missing_base() {
        let result = Migrator::new(
            Utf8Path::new("/nonexistent/base/dir"),
            MigrationConfig::default(),
        );
        assert!(matches!(result, Err(MigrateError::Config(_))));
    }

    #[test]
    fn test_run_end_to_end_single_file() {
        let (_dir, base) = setup_base();
        fs::create_dir_all(base.join("Workflows")).unwrap();
        fs::write(
            base.join("Workflows/wf.json"),
            r#"{"url": "{{$vars.API_URL}}"}"#,
        )
        .unwrap();

        let migrator = Migrator::new(&base, config_for(&["Workflows"])).unwrap();
        let stats = migrator.run().unwrap();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.processed_files, 1);
        assert_eq!(stats.skipped_files, 0);
        assert_eq!(stats.total_found(), 1);
        assert_eq!(stats.total_remaining(), 0);
        assert!(stats.is_complete());
        assert_eq!(stats.outcomes[0].status, ConversionStatus::Complete);

        // Converted sibling written, original untouched
        assert_eq!(
            fs::read_to_string(base.join("Workflows/wf_env.json")).unwrap(),
            r#"{"url": "{{$env.API_URL}}"}"#
        );
        assert_eq!(
            fs::read_to_string(base.join("Workflows/wf.json")).unwrap(),
            r#"{"url": "{{$vars.API_URL}}"}"#
        );

        // Backup mirrors the original path
        assert_eq!(
            fs::read_to_string(base.join("backup_pre_env/Workflows/wf.json")).unwrap(),
            r#"{"url": "{{$vars.API_URL}}"}"#
        );
    }

    #[test]
    fn test_run_skips_invalid_json_and_continues() {
        let (_dir, base) = setup_base();
        fs::create_dir_all(base.join("Workflows")).unwrap();
        fs::write(base.join("Workflows/bad.json"), "{broken").unwrap();
        fs::write(
            base.join("Workflows/good.json"),
            r#"{"key": "{{$vars.TOKEN}}"}"#,
        )
        .unwrap();

        let migrator = Migrator::new(&base, config_for(&["Workflows"])).unwrap();
        let stats = migrator.run().unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.processed_files, 1);
        assert_eq!(stats.skipped_files, 1);
        assert_eq!(stats.errors.len(), 1);
        assert_eq!(stats.errors[0].file, "Workflows/bad.json");
        assert!(stats.errors[0].message.contains("invalid JSON"));

        // No converted output for the malformed file
        assert!(!base.join("Workflows/bad_env.json").exists());
        // Backup was taken before the parse check
        assert!(base.join("backup_pre_env/Workflows/bad.json").exists());
        // The good file still converted
        assert!(base.join("Workflows/good_env.json").exists());
    }

    #[test]
    fn test_run_with_missing_module_directory() {
        let (_dir, base) = setup_base();
        fs::create_dir_all(base.join("Present")).unwrap();
        fs::write(base.join("Present/wf.json"), r#"{"a": 1}"#).unwrap();

        let migrator = Migrator::new(&base, config_for(&["Present", "Absent"])).unwrap();
        let stats = migrator.run().unwrap();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.processed_files, 1);
    }

    #[test]
    fn test_run_twice_does_not_reprocess_output() {
        let (_dir, base) = setup_base();
        fs::create_dir_all(base.join("Workflows")).unwrap();
        fs::write(
            base.join("Workflows/wf.json"),
            r#"{"url": "{{$vars.API_URL}}"}"#,
        )
        .unwrap();

        let migrator = Migrator::new(&base, config_for(&["Workflows"])).unwrap();
        migrator.run().unwrap();
        let second = migrator.run().unwrap();

        // Only the original is ever a candidate; its own output is excluded
        assert_eq!(second.total_files, 1);
        assert_eq!(second.processed_files, 1);
        assert_eq!(
            fs::read_to_string(base.join("Workflows/wf_env.json")).unwrap(),
            r#"{"url": "{{$env.API_URL}}"}"#
        );
    }

    #[test]
    fn test_discover_is_deterministic() {
        let (_dir, base) = setup_base();
        fs::create_dir_all(base.join("Workflows/b")).unwrap();
        fs::create_dir_all(base.join("Workflows/a")).unwrap();
        fs::write(base.join("Workflows/b/two.json"), "{}").unwrap();
        fs::write(base.join("Workflows/a/one.json"), "{}").unwrap();

        let migrator = Migrator::new(&base, config_for(&["Workflows"])).unwrap();
        let files = migrator.discover().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(&base).unwrap().as_str())
            .collect();

        assert_eq!(names, vec!["Workflows/a/one.json", "Workflows/b/two.json"]);
    }
}
