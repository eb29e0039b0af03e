//! Report generation for migration runs.
//!
//! Consumes the [`MigrationStats`] accumulated by a run and renders it for
//! humans (markdown) or machines (JSON):
//!
//! - [`render_markdown`]: the operator-facing report with summary, per-file
//!   details, errors, next steps, and restore instructions
//! - [`render_json`]: the statistics serialized as pretty-printed JSON
//! - [`write_report`]: renders and writes the markdown report to the
//!   configured reports directory
//!
//! Rendering is pure; only [`write_report`] touches the filesystem.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod markdown;

pub use error::ReportError;
pub use markdown::render_markdown;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use tracing::info;

use aw_core::{MigrationConfig, MigrationStats};

/// Serializes the statistics as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if serialization fails.
pub fn render_json(stats: &MigrationStats) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Renders the markdown report and writes it to
/// `<base_dir>/<reports_dir>/<report_file>`, creating the reports
/// directory if needed.
///
/// Returns the path of the written report.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub fn write_report(
    base_dir: &Utf8Path,
    config: &MigrationConfig,
    stats: &MigrationStats,
) -> Result<Utf8PathBuf, ReportError> {
    let reports_dir = base_dir.join(&config.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| ReportError::io(&reports_dir, e))?;

    let report_path = reports_dir.join(&config.report_file);
    let content = render_markdown(stats, config, Utc::now());
    std::fs::write(&report_path, content).map_err(|e| ReportError::io(&report_path, e))?;

    info!(path = %report_path, "Migration report written");
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_core::{FileOutcome, RewriteResult};

    fn sample_stats() -> MigrationStats {
        let mut stats = MigrationStats {
            total_files: 1,
            ..MigrationStats::default()
        };
        stats.record_outcome(FileOutcome::new(
            Utf8PathBuf::from("Workflows/wf.json"),
            Utf8PathBuf::from("Workflows/wf_env.json"),
            RewriteResult::new(0),
        ));
        stats
    }

    #[test]
    fn test_render_json_round_trips() {
        let stats = sample_stats();
        let json = render_json(&stats).unwrap();
        let parsed: MigrationStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stats);
    }

    #[test]
    fn test_write_report_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let config = MigrationConfig::default();

        let path = write_report(base, &config, &sample_stats()).unwrap();

        assert_eq!(
            path,
            base.join("migration_reports/vars_to_env_report.md")
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Workflow Migration Report"));
    }
}
