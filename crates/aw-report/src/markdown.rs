//! Markdown rendering of migration statistics.
//!
//! The report is written for the operator doing the deployment: a summary
//! table, per-file details, any errors, a checklist of next steps, and the
//! restore commands for the backup tree.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use aw_core::{MigrationConfig, MigrationStats};

/// Renders the full markdown report for one migration run.
///
/// The timestamp is passed in rather than read from the clock so rendering
/// is deterministic and testable.
#[must_use]
pub fn render_markdown(
    stats: &MigrationStats,
    config: &MigrationConfig,
    generated_at: DateTime<Utc>,
) -> String {
    let mut report = String::new();

    let _ = writeln!(report, "# Workflow Migration Report");
    let _ = writeln!(report);
    let _ = writeln!(report, "## `$vars` to `$env` Conversion");
    let _ = writeln!(report);
    let _ = writeln!(
        report,
        "**Generated:** {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(report);
    let _ = writeln!(report, "---");
    let _ = writeln!(report);

    render_summary(&mut report, stats);
    render_file_details(&mut report, stats);
    render_errors(&mut report, stats);
    render_next_steps(&mut report, stats);
    render_backup_section(&mut report, config);

    report
}

fn render_summary(report: &mut String, stats: &MigrationStats) {
    let _ = writeln!(report, "## Summary");
    let _ = writeln!(report);
    let _ = writeln!(report, "| Metric | Count |");
    let _ = writeln!(report, "|--------|-------|");
    let _ = writeln!(report, "| Total Files Found | {} |", stats.total_files);
    let _ = writeln!(
        report,
        "| Successfully Processed | {} |",
        stats.processed_files
    );
    let _ = writeln!(report, "| Skipped / Errors | {} |", stats.skipped_files);
    let _ = writeln!(report, "| Total `$vars` Found | {} |", stats.total_found());
    let _ = writeln!(report, "| Total Replaced | {} |", stats.total_converted());
    let _ = writeln!(report, "| Total Remaining | {} |", stats.total_remaining());
    let _ = writeln!(
        report,
        "| Distinct Variables | {} |",
        stats.distinct_variables().len()
    );
    let _ = writeln!(report);

    if stats.is_complete() {
        let _ = writeln!(
            report,
            "**Migration Status:** COMPLETE - all `$vars` references converted"
        );
    } else {
        let _ = writeln!(
            report,
            "**Migration Status:** INCOMPLETE - {} `$vars` references remain",
            stats.total_remaining()
        );
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "---");
    let _ = writeln!(report);
}

fn render_file_details(report: &mut String, stats: &MigrationStats) {
    let _ = writeln!(report, "## File Details");
    let _ = writeln!(report);
    let _ = writeln!(
        report,
        "| Original File | Output File | `$vars` Found | Replaced | Remaining | Status |"
    );
    let _ = writeln!(
        report,
        "|---------------|-------------|---------------|----------|-----------|--------|"
    );

    for outcome in &stats.outcomes {
        let _ = writeln!(
            report,
            "| {} | {} | {} | {} | {} | {} |",
            outcome.original,
            outcome.output,
            outcome.result.found,
            outcome.result.converted,
            outcome.result.remaining,
            outcome.status.label()
        );
    }
    let _ = writeln!(report);
}

fn render_errors(report: &mut String, stats: &MigrationStats) {
    if stats.errors.is_empty() {
        return;
    }

    let _ = writeln!(report, "---");
    let _ = writeln!(report);
    let _ = writeln!(report, "## Errors");
    let _ = writeln!(report);
    for error in &stats.errors {
        let _ = writeln!(report, "- **{}:** {}", error.file, error.message);
    }
    let _ = writeln!(report);
}

fn render_next_steps(report: &mut String, stats: &MigrationStats) {
    let _ = writeln!(report, "---");
    let _ = writeln!(report);
    let _ = writeln!(report, "## Next Steps");
    let _ = writeln!(report);

    if stats.is_complete() {
        let _ = writeln!(report, "All workflows successfully migrated.");
        let _ = writeln!(report);
        let _ = writeln!(report, "### Deployment Checklist");
        let _ = writeln!(report);
        let _ = writeln!(report, "1. [x] Convert all `$vars` references to `$env`");
        let _ = writeln!(
            report,
            "2. [ ] Update the `.env` file with every required variable"
        );
        let _ = writeln!(report, "3. [ ] Test workflows in the target environment");
        let _ = writeln!(report, "4. [ ] Verify environment variable loading");
        let _ = writeln!(
            report,
            "5. [ ] Retire original workflow files (backups are kept)"
        );
        let _ = writeln!(
            report,
            "6. [ ] Rename `*_env.json` files to drop the suffix (optional)"
        );
    } else {
        let _ = writeln!(
            report,
            "Manual review required for {} remaining `$vars` references.",
            stats.total_remaining()
        );
        let _ = writeln!(report);
        let _ = writeln!(report, "### Action Items");
        let _ = writeln!(report);
        let _ = writeln!(report, "1. Review files with a remaining count above zero");
        let _ = writeln!(report, "2. Convert complex expressions by hand");
        let _ = writeln!(report, "3. Re-run the migration after fixes");
        let _ = writeln!(
            report,
            "4. Verify every variable exists in the `.env` file"
        );
    }
    let _ = writeln!(report);
}

fn render_backup_section(report: &mut String, config: &MigrationConfig) {
    let _ = writeln!(report, "---");
    let _ = writeln!(report);
    let _ = writeln!(report, "## Backup Location");
    let _ = writeln!(report);
    let _ = writeln!(
        report,
        "Original files are backed up under `{}/`.",
        config.backup_dir
    );
    let _ = writeln!(report);
    let _ = writeln!(report, "To restore the originals:");
    let _ = writeln!(report);
    let _ = writeln!(report, "```bash");
    for dir in &config.directories {
        let _ = writeln!(report, "cp -r {}/{dir}/* {dir}/", config.backup_dir);
    }
    let _ = writeln!(report, "```");
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_core::{FileOutcome, RewriteResult};
    use camino::Utf8PathBuf;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap()
    }

    fn complete_stats() -> MigrationStats {
        let mut stats = MigrationStats {
            total_files: 1,
            ..MigrationStats::default()
        };
        let mut result = RewriteResult::new(1);
        result.record("API_URL", "{{$vars.API_URL}} → {{$env.API_URL}}".to_owned());
        stats.record_outcome(FileOutcome::new(
            Utf8PathBuf::from("Workflows/wf.json"),
            Utf8PathBuf::from("Workflows/wf_env.json"),
            result,
        ));
        stats
    }

    #[test]
    fn test_render_complete_report() {
        let stats = complete_stats();
        let report = render_markdown(&stats, &MigrationConfig::default(), fixed_time());

        assert!(report.contains("# Workflow Migration Report"));
        assert!(report.contains("**Generated:** 2025-06-01T12:00:00Z"));
        assert!(report.contains("| Total Files Found | 1 |"));
        assert!(report.contains("| Total `$vars` Found | 1 |"));
        assert!(report.contains("**Migration Status:** COMPLETE"));
        assert!(report.contains(
            "| Workflows/wf.json | Workflows/wf_env.json | 1 | 1 | 0 | Complete |"
        ));
        assert!(report.contains("### Deployment Checklist"));
        assert!(report.contains("cp -r backup_pre_env/Aigent_Modules_Core/* Aigent_Modules_Core/"));
        // No errors section when nothing failed
        assert!(!report.contains("## Errors"));
    }

    #[test]
    fn test_render_incomplete_report() {
        let mut stats = complete_stats();
        let mut result = RewriteResult::new(3);
        result.remaining = 2;
        stats.record_outcome(FileOutcome::new(
            Utf8PathBuf::from("Workflows/hard.json"),
            Utf8PathBuf::from("Workflows/hard_env.json"),
            result,
        ));

        let report = render_markdown(&stats, &MigrationConfig::default(), fixed_time());
        assert!(report.contains("**Migration Status:** INCOMPLETE - 2 `$vars` references remain"));
        assert!(report.contains("### Action Items"));
        assert!(!report.contains("### Deployment Checklist"));
        assert!(report.contains("| Workflows/hard.json | Workflows/hard_env.json | 3 | 0 | 2 | Incomplete |"));
    }

    #[test]
    fn test_render_errors_section() {
        let mut stats = complete_stats();
        stats.record_error(
            Utf8PathBuf::from("Workflows/bad.json"),
            "invalid JSON in Workflows/bad.json: expected value".to_owned(),
        );

        let report = render_markdown(&stats, &MigrationConfig::default(), fixed_time());
        assert!(report.contains("## Errors"));
        assert!(report.contains("- **Workflows/bad.json:**"));
        assert!(report.contains("| Skipped / Errors | 1 |"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let stats = complete_stats();
        let config = MigrationConfig::default();
        let first = render_markdown(&stats, &config, fixed_time());
        let second = render_markdown(&stats, &config, fixed_time());
        assert_eq!(first, second);
    }
}
