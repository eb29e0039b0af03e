//! Pre-mutation file backups.
//!
//! [`BackupManager`] copies each original file into a backup tree that
//! mirrors its path relative to the migration base directory. Backups are
//! taken before any other processing, so even a file that later fails
//! JSON validation is preserved.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::MigrateError;

/// Copies originals into a mirrored backup tree.
///
/// The backup tree lives at `<base_dir>/<backup_dir>/` and mirrors the
/// relative layout of the originals. Re-running a migration silently
/// overwrites prior backups at the same path; there is no versioning.
///
/// # Examples
///
/// ```ignore
/// use aw_migrate::BackupManager;
/// use camino::Utf8Path;
///
/// let backups = BackupManager::new(Utf8Path::new("."), "backup_pre_env");
/// let dest = backups.backup(Utf8Path::new("./Aigent_Modules_Core/wf.json"))?;
/// ```
#[derive(Debug)]
pub struct BackupManager {
    /// The migration base directory backups are relative to.
    base_dir: Utf8PathBuf,
    /// Name of the backup directory under the base directory.
    backup_dir: String,
}

impl BackupManager {
    /// Creates a backup manager rooted at the given base directory.
    #[must_use]
    pub fn new(base_dir: &Utf8Path, backup_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.to_owned(),
            backup_dir: backup_dir.into(),
        }
    }

    /// Copies `path` into the backup tree, creating intermediate
    /// directories as needed, and returns the backup location.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Backup`] if directory creation or the copy
    /// itself fails.
    pub fn backup(&self, path: &Utf8Path) -> Result<Utf8PathBuf, MigrateError> {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let destination = self.base_dir.join(&self.backup_dir).join(relative);

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MigrateError::backup(path, e))?;
        }

        std::fs::copy(path, &destination).map_err(|e| MigrateError::backup(path, e))?;
        debug!(file = %relative, backup = %destination, "Backed up");

        Ok(destination)
    }
}
