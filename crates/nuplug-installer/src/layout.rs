use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nuplug_core::{ArchiveType, InstallMode, LayoutConfig, PackageRequest};

/// Paths derived from a single [`PackageRequest`]. Nothing here touches the
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub install_dir: PathBuf,
    pub temp_archive_path: PathBuf,
    pub temp_extract_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    data_root: PathBuf,
    cache_root: PathBuf,
    dirs: LayoutConfig,
    archive_type: ArchiveType,
}

impl InstallLayout {
    pub fn new(data_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            cache_root: cache_root.into(),
            dirs: LayoutConfig::default(),
            archive_type: ArchiveType::default(),
        }
    }

    pub fn with_dirs(mut self, dirs: LayoutConfig) -> Self {
        self.dirs = dirs;
        self
    }

    pub fn with_archive_type(mut self, archive_type: ArchiveType) -> Self {
        self.archive_type = archive_type;
        self
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.data_root.join(&self.dirs.plugins_dir)
    }

    pub fn tooling_dir(&self) -> PathBuf {
        self.plugins_dir().join(&self.dirs.tooling_dir)
    }

    pub fn install_dir(&self, request: &PackageRequest) -> PathBuf {
        let base = match request.install_mode {
            InstallMode::Standard => self.plugins_dir(),
            InstallMode::ToolingOnly => self.tooling_dir(),
        };
        base.join(&request.id)
    }

    pub fn temp_archive_path(&self, request: &PackageRequest) -> PathBuf {
        self.cache_root.join(format!(
            "{}.{}",
            request.scratch_stem(),
            self.archive_type.cache_extension()
        ))
    }

    pub fn temp_extract_dir(&self, request: &PackageRequest) -> PathBuf {
        self.cache_root.join(request.scratch_stem())
    }

    pub fn resolve(&self, request: &PackageRequest) -> InstallPaths {
        InstallPaths {
            install_dir: self.install_dir(request),
            temp_archive_path: self.temp_archive_path(request),
            temp_extract_dir: self.temp_extract_dir(request),
        }
    }

    /// Idempotent. An existing install dir says nothing about whether a
    /// previous install succeeded.
    pub fn ensure_install_dir(&self, request: &PackageRequest) -> io::Result<PathBuf> {
        let dir = self.install_dir(request);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

pub fn resolve_paths(request: &PackageRequest, data_root: &Path, cache_root: &Path) -> InstallPaths {
    InstallLayout::new(data_root, cache_root).resolve(request)
}
