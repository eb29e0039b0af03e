//! Directory traversal for workflow files.
//!
//! [`WorkflowWalker`] recursively collects candidate `.json` files under
//! one root directory. The backup and reports directories are pruned
//! entirely, and files already carrying the output-suffix marker are
//! excluded so a second run never re-processes its own output.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::warn;

use aw_core::{MigrationConfig, WORKFLOW_EXTENSION};

use crate::error::MigrateError;

/// A walker that discovers workflow files under a single root directory.
///
/// # Design
///
/// The walker collects all paths first (single-threaded, I/O bound); the
/// orchestrator then processes them strictly in order. Results are sorted
/// so discovery order is deterministic across runs and platforms.
///
/// # Examples
///
/// ```ignore
/// use aw_migrate::WorkflowWalker;
/// use aw_core::MigrationConfig;
/// use camino::Utf8Path;
///
/// let config = MigrationConfig::default();
/// let walker = WorkflowWalker::new(Utf8Path::new("./Aigent_Modules_Core"), &config);
/// let paths = walker.collect_paths()?;
/// ```
#[derive(Debug)]
pub struct WorkflowWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Directory names that are never descended into.
    prune_dirs: Vec<String>,
    /// File-name marker carried by already-converted files.
    output_marker: String,
}

impl WorkflowWalker {
    /// Creates a walker for the given root, pruning the configured backup
    /// and reports directories.
    #[must_use]
    pub fn new(root: &Utf8Path, config: &MigrationConfig) -> Self {
        Self {
            root: root.to_owned(),
            prune_dirs: vec![config.backup_dir.clone(), config.reports_dir.clone()],
            output_marker: config.output_marker(),
        }
    }

    /// Collects all candidate workflow file paths under the root.
    ///
    /// A root that does not exist contributes nothing and logs a warning;
    /// a batch spanning several module directories should not fail because
    /// one of them is absent.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Walk`] if traversal fails or
    /// [`MigrateError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, MigrateError> {
        if !self.root.is_dir() {
            warn!(root = %self.root, "Directory not found, skipping");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();

        for entry in self.build_walker() {
            let entry = entry?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path = Utf8Path::from_path(path)
                .ok_or_else(|| MigrateError::NonUtf8Path(path.to_owned()))?;

            if self.is_candidate(utf8_path) {
                paths.push(utf8_path.to_owned());
            }
        }

        paths.sort_unstable();
        Ok(paths)
    }

    /// Builds the underlying walker, pruning excluded directories so they
    /// are never descended into.
    fn build_walker(&self) -> ignore::Walk {
        let prune = self.prune_dirs.clone();
        WalkBuilder::new(&self.root)
            // Workflow exports are plain data directories; gitignore and
            // hidden-file filtering would hide real inputs.
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let excluded = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| prune.iter().any(|d| d == name));
                !(is_dir && excluded)
            })
            .build()
    }

    /// Checks whether a file is a workflow candidate: a `.json` file that
    /// is not itself the output of a previous run.
    fn is_candidate(&self, path: &Utf8Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == WORKFLOW_EXTENSION);
        let already_converted = path
            .file_name()
            .is_some_and(|name| name.contains(&self.output_marker));
        has_extension && !already_converted
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn walker_for(root: &str) -> WorkflowWalker {
        WorkflowWalker::new(Utf8Path::new(root), &MigrationConfig::default())
    }

    #[test]
    fn test_is_candidate_accepts_workflow_files() {
        let walker = walker_for(".");
        assert!(walker.is_candidate(Utf8Path::new("wf.json")));
        assert!(walker.is_candidate(Utf8Path::new("a/b/lead_intake.json")));
    }

    #[test]
    fn test_is_candidate_rejects_other_extensions() {
        let walker = walker_for(".");
        assert!(!walker.is_candidate(Utf8Path::new("readme.md")));
        assert!(!walker.is_candidate(Utf8Path::new("wf.json.bak")));
        assert!(!walker.is_candidate(Utf8Path::new("workflow")));
    }

    #[test]
    fn test_is_candidate_rejects_converted_output() {
        let walker = walker_for(".");
        assert!(!walker.is_candidate(Utf8Path::new("wf_env.json")));
        assert!(!walker.is_candidate(Utf8Path::new("a/lead_env.json")));
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let walker = walker_for("/nonexistent/path/that/does/not/exist");
        let paths = walker.collect_paths().unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_collect_prunes_backup_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        fs::write(root.join("wf.json"), "{}").unwrap();
        fs::write(root.join("wf_env.json"), "{}").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::create_dir_all(root.join("backup_pre_env/sub")).unwrap();
        fs::write(root.join("backup_pre_env/sub/old.json"), "{}").unwrap();
        fs::create_dir_all(root.join("migration_reports")).unwrap();
        fs::write(root.join("migration_reports/data.json"), "{}").unwrap();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("nested/deep.json"), "{}").unwrap();

        let walker = WorkflowWalker::new(root, &MigrationConfig::default());
        let paths = walker.collect_paths().unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().as_str())
            .collect();

        assert_eq!(names, vec!["nested/deep.json", "wf.json"]);
    }
}
