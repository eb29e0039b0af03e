//! CLI entry point for the aw-migration tool.
//!
//! This binary converts `$vars.NAME` references to `$env.NAME` across the
//! Aigent workflow module directories, backing up originals and writing a
//! migration report.
//!
//! # Usage
//!
//! ```bash
//! aw-migrate [OPTIONS] <COMMAND>
//!
//! # List candidate workflow files without touching anything
//! aw-migrate scan --path /path/to/workflows --detailed
//!
//! # Run the migration and write the markdown report
//! aw-migrate migrate --path /path/to/workflows
//!
//! # Run the migration, emitting the statistics as JSON
//! aw-migrate migrate --format json --output stats.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aw_core::MigrationConfig;
use aw_migrate::Migrator;

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// CLI tool for migrating workflow files from `$vars.*` to `$env.*`.
///
/// Scans the configured module directories for JSON workflow files,
/// backs each one up, rewrites its variable references, and writes the
/// converted copy next to the original.
#[derive(Parser)]
#[command(name = "aw-migrate", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Base directory containing the workflow module directories.
    #[arg(short, long, global = true, env = "AW_MIGRATE_PATH", default_value = ".")]
    path: Utf8PathBuf,

    /// Path to a JSON configuration file overriding the default layout.
    #[arg(short, long, global = true, env = "AW_MIGRATE_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Module directories to scan (repeatable; overrides the configured list).
    #[arg(short = 'd', long = "dir", global = true)]
    dirs: Vec<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List candidate workflow files without modifying anything.
    Scan {
        /// Show every discovered file, not just the count.
        #[arg(long)]
        detailed: bool,
    },

    /// Back up, convert, and report on every workflow file.
    Migrate {
        /// Report output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Write the report here instead of the configured reports directory.
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Operator-facing markdown report.
    Markdown,
    /// Statistics serialized as JSON.
    Json,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `no_color` - Disable ANSI colors in output
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds the [`MigrationConfig`] from CLI arguments.
///
/// Loads the config file when given, otherwise starts from defaults, then
/// applies the `--dir` overrides and validates the result.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or validation
/// fails.
fn build_config(cli: &Cli) -> color_eyre::Result<MigrationConfig> {
    let mut config = match &cli.config {
        Some(path) => MigrationConfig::from_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config {path}: {e}"))?,
        None => MigrationConfig::default(),
    };

    if !cli.dirs.is_empty() {
        config.directories.clone_from(&cli.dirs);
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {e}"))?;

    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Lists candidate workflow files without modifying anything.
///
/// # Errors
///
/// Returns an error if the base directory is invalid or traversal fails.
fn run_scan(cli: &Cli, config: MigrationConfig, detailed: bool) -> color_eyre::Result<()> {
    let migrator = Migrator::new(&cli.path, config)?;
    let files = migrator.discover()?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle)?;
    writeln!(handle, "Found {} workflow file(s)", files.len())?;

    if detailed {
        for file in &files {
            let relative = file.strip_prefix(&cli.path).unwrap_or(file);
            writeln!(handle, "  {relative}")?;
        }
    }

    Ok(())
}

/// Runs the full migration and writes the report.
///
/// Per-file failures are recorded in the report and do not affect the
/// exit code; only a fatal setup or traversal error does.
///
/// # Errors
///
/// Returns an error if the migration cannot start, traversal fails, or
/// the report cannot be written.
fn run_migrate(
    cli: &Cli,
    config: MigrationConfig,
    format: ReportFormat,
    output: Option<Utf8PathBuf>,
) -> color_eyre::Result<()> {
    info!(path = %cli.path, "Starting migration");

    let migrator = Migrator::new(&cli.path, config)?;
    let stats = migrator.run()?;

    let report_path = match format {
        ReportFormat::Markdown => match output {
            Some(path) => {
                let content =
                    aw_report::render_markdown(&stats, migrator.config(), chrono::Utc::now());
                std::fs::write(path.as_std_path(), content)?;
                path
            }
            None => aw_report::write_report(&cli.path, migrator.config(), &stats)?,
        },
        ReportFormat::Json => {
            let content = aw_report::render_json(&stats)?;
            match output {
                Some(path) => {
                    std::fs::write(path.as_std_path(), content)?;
                    path
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    writeln!(handle, "{content}")?;
                    print_summary(&stats, None)?;
                    return Ok(());
                }
            }
        }
    };

    print_summary(&stats, Some(&report_path))?;
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the run summary to stdout.
fn print_summary(
    stats: &aw_core::MigrationStats,
    report_path: Option<&Utf8PathBuf>,
) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle)?;
    writeln!(handle, "Migration Summary")?;
    writeln!(handle, "=================")?;
    writeln!(handle)?;
    writeln!(
        handle,
        "Processed: {}/{} files",
        stats.processed_files, stats.total_files
    )?;
    writeln!(handle, "Skipped:   {}", stats.skipped_files)?;
    writeln!(
        handle,
        "Variables: {} found, {} replaced, {} remaining",
        stats.total_found(),
        stats.total_converted(),
        stats.total_remaining()
    )?;

    if stats.is_complete() {
        writeln!(handle)?;
        writeln!(handle, "All $vars references converted.")?;
    } else {
        writeln!(handle)?;
        writeln!(
            handle,
            "WARNING: {} $vars references remain and need manual review.",
            stats.total_remaining()
        )?;
    }

    if !stats.errors.is_empty() {
        writeln!(handle)?;
        writeln!(handle, "Errors ({}):", stats.errors.len())?;
        for error in &stats.errors {
            writeln!(handle, "  {} - {}", error.file, error.message)?;
        }
    }

    if let Some(path) = report_path {
        writeln!(handle)?;
        writeln!(handle, "Full report: {path}")?;
    }

    Ok(())
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let config = build_config(&cli)?;

    match &cli.command {
        Commands::Scan { detailed } => run_scan(&cli, config, *detailed),
        Commands::Migrate { format, output } => {
            run_migrate(&cli, config, *format, output.clone())
        }
    }
}
