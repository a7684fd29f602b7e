use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;

/// Unpacks a zip-compatible package archive into `dest_dir`.
///
/// Files already present at matching relative paths are overwritten, so a
/// stale extraction left by an earlier failed run is repaired in place.
/// Returns the number of file entries written.
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive_path).map_err(|source| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|source| ExtractError::Corrupt {
            path: archive_path.to_path_buf(),
            source,
        })?;

    fs::create_dir_all(dest_dir).map_err(|source| ExtractError::Write {
        path: dest_dir.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ExtractError::Corrupt {
                path: archive_path.to_path_buf(),
                source,
            })?;

        let name = entry.name().to_string();
        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractError::UnsafeEntry { entry: name });
        };
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|source| ExtractError::Write {
                path: outpath.clone(),
                source,
            })?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|source| ExtractError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut outfile = File::create(&outpath).map_err(|source| ExtractError::Write {
            path: outpath.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut outfile)
            .map_err(|source| ExtractError::Entry { entry: name, source })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode((mode & 0o777) | 0o600))
                    .map_err(|source| ExtractError::Write {
                        path: outpath.clone(),
                        source,
                    })?;
            }
        }

        written += 1;
    }

    debug!(
        archive = %archive_path.display(),
        dest = %dest_dir.display(),
        files = written,
        "archive extracted"
    );
    Ok(written)
}
