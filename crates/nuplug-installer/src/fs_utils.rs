use std::fs;
use std::io;
use std::path::Path;

pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

pub fn remove_dir_all_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Moves `src` to `dst`, falling back to copy-then-remove when a rename is
/// not possible (different filesystems).
pub fn move_file_or_copy(src: &Path, dst: &Path) -> io::Result<()> {
    move_file_with_rename(src, dst, |from, to| fs::rename(from, to))
}

pub(crate) fn move_file_with_rename<Rename>(
    src: &Path,
    dst: &Path,
    rename: Rename,
) -> io::Result<()>
where
    Rename: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
    }
}

pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
