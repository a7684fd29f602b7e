use std::path::{Path, PathBuf};

use nuplug_core::PackageRequest;

use crate::error::NoMatchingProfileError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProfile {
    /// The candidate entry as configured, e.g. `lib/netstandard2.0`.
    pub candidate: String,
    pub dir: PathBuf,
}

/// Returns the first candidate, in preference order, that exists as a
/// directory under `extract_root`.
pub fn select_profile(
    extract_root: &Path,
    candidates: &[String],
    request: &PackageRequest,
) -> Result<SelectedProfile, NoMatchingProfileError> {
    candidates
        .iter()
        .map(|candidate| (candidate, extract_root.join(candidate)))
        .find(|(_, dir)| dir.is_dir())
        .map(|(candidate, dir)| SelectedProfile {
            candidate: candidate.clone(),
            dir,
        })
        .ok_or_else(|| NoMatchingProfileError {
            package_id: request.id.clone(),
            package_version: request.version.clone(),
            candidates: candidates.to_vec(),
        })
}
