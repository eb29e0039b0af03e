//! Configuration for the aw-migration tool.
//!
//! [`MigrationConfig`] captures the directory layout and naming conventions
//! the migration operates under: which module directories to scan, where
//! backups and reports go, and the suffix appended to converted files.
//!
//! Defaults match the Aigent workflow deployment layout.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::WORKFLOW_EXTENSION;

/// Configuration for a migration run.
///
/// All fields have sensible defaults; a config file only needs to name the
/// options it overrides.
///
/// # Examples
///
/// ```
/// use aw_core::MigrationConfig;
///
/// let config = MigrationConfig::default();
/// assert_eq!(config.backup_dir, "backup_pre_env");
/// assert_eq!(config.output_suffix, "_env");
/// assert_eq!(config.output_marker(), "_env.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Module directories to scan, relative to the migration base directory.
    pub directories: Vec<String>,

    /// Name of the backup directory created under the base directory.
    pub backup_dir: String,

    /// Name of the directory the markdown report is written into.
    pub reports_dir: String,

    /// Suffix inserted before the `.json` extension of converted files.
    pub output_suffix: String,

    /// File name of the generated markdown report.
    pub report_file: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            directories: vec![
                "Aigent_Modules_Core".to_owned(),
                "Aigent_Modules_Enterprise".to_owned(),
            ],
            backup_dir: "backup_pre_env".to_owned(),
            reports_dir: "migration_reports".to_owned(),
            output_suffix: "_env".to_owned(),
            report_file: "vars_to_env_report.md".to_owned(),
        }
    }
}

impl MigrationConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The loaded configuration
    /// is validated before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, or
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if any option is empty or if
    /// the output suffix would not distinguish converted files from their
    /// originals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directories.is_empty() {
            return Err(ConfigError::invalid_option(
                "directories",
                "at least one module directory is required",
            ));
        }
        if self.directories.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_option(
                "directories",
                "directory names must not be empty",
            ));
        }
        if self.backup_dir.is_empty() {
            return Err(ConfigError::invalid_option(
                "backup_dir",
                "must not be empty",
            ));
        }
        if self.reports_dir.is_empty() {
            return Err(ConfigError::invalid_option(
                "reports_dir",
                "must not be empty",
            ));
        }
        if self.output_suffix.is_empty() {
            return Err(ConfigError::invalid_option(
                "output_suffix",
                "must not be empty, or converted files would overwrite originals",
            ));
        }
        if self.report_file.is_empty() {
            return Err(ConfigError::invalid_option(
                "report_file",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Returns the file-name marker carried by already-converted files.
    ///
    /// A file whose name contains this marker (e.g. `_env.json`) is the
    /// output of a previous run and must not be re-processed.
    #[must_use]
    pub fn output_marker(&self) -> String {
        format!("{}.{WORKFLOW_EXTENSION}", self.output_suffix)
    }
}
