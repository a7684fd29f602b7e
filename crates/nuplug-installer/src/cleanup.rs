use std::path::Path;

use tracing::{debug, warn};

use crate::fs_utils::{remove_dir_all_if_exists, remove_file_if_exists};

/// Best-effort removal of the temp archive and the temp extraction tree.
/// Missing paths are fine; anything else is logged and returned as a warning
/// instead of failing the install.
pub fn cleanup(temp_archive_path: &Path, temp_extract_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    match remove_file_if_exists(temp_archive_path) {
        Ok(removed) => debug!(path = %temp_archive_path.display(), removed, "temp archive cleaned"),
        Err(err) => {
            let message = format!(
                "failed to remove temp archive {}: {err}",
                temp_archive_path.display()
            );
            warn!("{message}");
            warnings.push(message);
        }
    }

    match remove_dir_all_if_exists(temp_extract_dir) {
        Ok(removed) => debug!(path = %temp_extract_dir.display(), removed, "temp extraction cleaned"),
        Err(err) => {
            let message = format!(
                "failed to remove temp extraction dir {}: {err}",
                temp_extract_dir.display()
            );
            warn!("{message}");
            warnings.push(message);
        }
    }

    warnings
}
