use std::fs;
use std::path::{Path, PathBuf};

use nuplug_core::FileFilters;
use tracing::debug;

use crate::error::MigrateError;
use crate::fs_utils::{entry_exists, move_file_or_copy};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Destination paths of files moved into the target dir.
    pub moved: Vec<PathBuf>,
    /// Source paths left in place because the destination name was taken.
    pub skipped: Vec<PathBuf>,
}

impl MigrationReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }
}

/// Moves each file to `target_dir/<file name>`, never overwriting. An
/// existing destination is skipped silently, which keeps reinstalls
/// idempotent but also means a stale file is never replaced.
pub fn migrate(files: &[PathBuf], target_dir: &Path) -> Result<MigrationReport, MigrateError> {
    let mut report = MigrationReport::default();
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let dst = target_dir.join(name);
        if entry_exists(&dst) {
            debug!(file = %dst.display(), "destination exists, skipping");
            report.skipped.push(file.clone());
            continue;
        }

        move_file_or_copy(file, &dst).map_err(|source| MigrateError::Move {
            from: file.clone(),
            to: dst.clone(),
            source,
        })?;
        debug!(from = %file.display(), to = %dst.display(), "moved file");
        report.moved.push(dst);
    }
    Ok(report)
}

/// Files directly inside the selected profile dir carrying the primary
/// extension. Subdirectories are not descended into.
pub fn collect_primary_artifacts(
    profile_dir: &Path,
    filters: &FileFilters,
) -> Result<Vec<PathBuf>, MigrateError> {
    collect_files(profile_dir, |path, _name| filters.is_primary(path))
}

/// Files directly under the extraction root whose name ends with one of the
/// allow-listed suffixes.
pub fn collect_auxiliary_files(
    extract_root: &Path,
    filters: &FileFilters,
) -> Result<Vec<PathBuf>, MigrateError> {
    collect_files(extract_root, |_path, name| filters.is_auxiliary(name))
}

fn collect_files<F>(dir: &Path, mut keep: F) -> Result<Vec<PathBuf>, MigrateError>
where
    F: FnMut(&Path, &str) -> bool,
{
    let scan_err = |source| MigrateError::Scan {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        if !entry.file_type().map_err(scan_err)?.is_file() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if keep(&path, &name) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
