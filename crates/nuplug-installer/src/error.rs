use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::stage::InstallStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// DNS, connect, TLS, timeout or a broken body stream.
    Transport,
    /// The registry answered with a non-2xx status.
    Status,
    /// The response could not be written to the destination file.
    Write,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("failed to download {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub kind: FetchErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub(crate) fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self {
            url: url.to_string(),
            kind: FetchErrorKind::Transport,
            status: None,
            message: err.to_string(),
        }
    }

    pub(crate) fn status(url: &str, status: reqwest::StatusCode) -> Self {
        Self {
            url: url.to_string(),
            kind: FetchErrorKind::Status,
            status: Some(status.as_u16()),
            message: format!("registry responded with HTTP {status}"),
        }
    }

    pub(crate) fn write(url: &str, path: &Path, err: io::Error) -> Self {
        Self {
            url: url.to_string(),
            kind: FetchErrorKind::Write,
            status: None,
            message: format!("failed to write {}: {err}", path.display()),
        }
    }

    pub(crate) fn cancelled(url: &str) -> Self {
        Self {
            url: url.to_string(),
            kind: FetchErrorKind::Cancelled,
            status: None,
            message: "download cancelled".to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FetchErrorKind::Cancelled
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("archive {} is corrupt or truncated: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("archive entry '{entry}' escapes the extraction directory")]
    UnsafeEntry { entry: String },
    #[error("failed to extract archive entry '{entry}': {source}")]
    Entry {
        entry: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The package ships none of the configured runtime profiles. Retrying the
/// same id and version can never succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "package {package_id} {package_version} doesn't support any runtime profile ({})",
    .candidates.join(", ")
)]
pub struct NoMatchingProfileError {
    pub package_id: String,
    pub package_version: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("failed to read {}: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to create install directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Profile(#[from] NoMatchingProfileError),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
    #[error("install cancelled before reaching {stage}")]
    Cancelled { stage: InstallStage },
}

impl InstallError {
    /// The state the pipeline was trying to reach when it failed.
    pub fn stage(&self) -> InstallStage {
        match self {
            Self::Filesystem { .. } => InstallStage::DirEnsured,
            Self::Fetch(_) => InstallStage::Downloaded,
            Self::Extract(_) => InstallStage::Extracted,
            Self::Profile(_) => InstallStage::ProfileSelected,
            Self::Migrate(_) => InstallStage::Migrated,
            Self::Cancelled { stage } => *stage,
        }
    }

    pub fn is_incompatible_package(&self) -> bool {
        matches!(self, Self::Profile(_))
    }
}
