use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use nuplug_core::{InstallMode, InstallerConfig, PackageRequest};
use serde::Serialize;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::cleanup::cleanup;
use crate::error::InstallError;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::layout::{InstallLayout, InstallPaths};
use crate::migrate::{collect_auxiliary_files, collect_primary_artifacts, migrate};
use crate::profile::select_profile;
use crate::stage::InstallStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallEvent {
    Stage(InstallStage),
    Download { downloaded: u64, total: Option<u64> },
}

/// Per-call knobs for [`Installer::install_package`].
pub struct InstallOptions<'a> {
    pub notify_host_on_success: bool,
    cancel: Option<CancelToken>,
    reindex: Option<Box<dyn FnOnce() + 'a>>,
    observer: Option<Box<dyn FnMut(&InstallEvent) + 'a>>,
}

impl Default for InstallOptions<'_> {
    fn default() -> Self {
        Self {
            notify_host_on_success: true,
            cancel: None,
            reindex: None,
            observer: None,
        }
    }
}

impl<'a> InstallOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify_host(mut self, notify: bool) -> Self {
        self.notify_host_on_success = notify;
        self
    }

    /// Host reindex hook, run once after a fully successful install when
    /// `notify_host_on_success` is set.
    pub fn with_reindex(mut self, hook: impl FnOnce() + 'a) -> Self {
        self.reindex = Some(Box::new(hook));
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_observer(mut self, observer: impl FnMut(&InstallEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn emit(&mut self, event: InstallEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }

    fn enter(&mut self, stage: InstallStage) {
        debug!(stage = %stage, "install stage reached");
        self.emit(InstallEvent::Stage(stage));
    }

    fn ensure_not_cancelled(&self, next: InstallStage) -> Result<(), InstallError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(InstallError::Cancelled { stage: next }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSummary {
    pub package_id: String,
    pub package_version: String,
    pub install_mode: InstallMode,
    pub install_dir: PathBuf,
    pub profile: String,
    pub primary_moved: usize,
    pub auxiliary_moved: usize,
    /// File names left untouched because the install dir already had them.
    pub skipped: Vec<String>,
    pub cleanup_warnings: Vec<String>,
    pub reindexed: bool,
}

#[derive(Debug, Clone)]
pub struct Installer {
    config: InstallerConfig,
    layout: InstallLayout,
    fetcher: Fetcher,
}

impl Installer {
    pub fn new(
        config: InstallerConfig,
        data_root: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid installer config")?;
        let archive_type = config.registry.archive_type()?;
        let layout = InstallLayout::new(data_root, cache_root)
            .with_dirs(config.layout.clone())
            .with_archive_type(archive_type);
        let fetcher = Fetcher::new(
            &config.registry.user_agent,
            config.registry.timeout_secs.map(Duration::from_secs),
        )
        .context("failed to build registry HTTP client")?;

        Ok(Self {
            config,
            layout,
            fetcher,
        })
    }

    pub fn download_url(&self, request: &PackageRequest) -> String {
        request.download_url(&self.config.registry.url_template)
    }

    pub fn resolve_paths(&self, request: &PackageRequest) -> InstallPaths {
        self.layout.resolve(request)
    }

    /// Downloads, unpacks and installs one package without its dependencies.
    ///
    /// The install dir is created before any network activity and survives
    /// every failure. Temp artifacts are removed only after the files have
    /// been migrated; any earlier failure leaves them on disk for
    /// inspection. Two concurrent installs of the same id and version share
    /// temp paths and race with each other.
    pub fn install_package(
        &self,
        request: &PackageRequest,
        mut options: InstallOptions<'_>,
    ) -> Result<InstallSummary, InstallError> {
        let paths = self.resolve_paths(request);
        let url = self.download_url(request);
        info!(
            package = %request.id,
            version = %request.version,
            mode = request.install_mode.as_str(),
            "installing package"
        );
        options.enter(InstallStage::Init);

        options.ensure_not_cancelled(InstallStage::DirEnsured)?;
        self.layout
            .ensure_install_dir(request)
            .map_err(|source| InstallError::Filesystem {
                path: paths.install_dir.clone(),
                source,
            })?;
        options.enter(InstallStage::DirEnsured);

        options.ensure_not_cancelled(InstallStage::Downloaded)?;
        let cancel = options.cancel.clone();
        self.fetcher
            .download_with_progress(
                &url,
                &paths.temp_archive_path,
                cancel.as_ref(),
                |downloaded, total| options.emit(InstallEvent::Download { downloaded, total }),
            )
            .map_err(|err| {
                if err.is_cancelled() {
                    InstallError::Cancelled {
                        stage: InstallStage::Downloaded,
                    }
                } else {
                    InstallError::Fetch(err)
                }
            })?;
        options.enter(InstallStage::Downloaded);

        options.ensure_not_cancelled(InstallStage::Extracted)?;
        extract(&paths.temp_archive_path, &paths.temp_extract_dir)?;
        options.enter(InstallStage::Extracted);

        options.ensure_not_cancelled(InstallStage::ProfileSelected)?;
        let profile = select_profile(
            &paths.temp_extract_dir,
            self.config.profiles.candidates(),
            request,
        )?;
        debug!(profile = %profile.candidate, "runtime profile selected");
        options.enter(InstallStage::ProfileSelected);

        options.ensure_not_cancelled(InstallStage::Migrated)?;
        let filters = &self.config.files;
        let primary = collect_primary_artifacts(&profile.dir, filters)?;
        let primary_report = migrate(&primary, &paths.install_dir)?;
        let auxiliary = collect_auxiliary_files(&paths.temp_extract_dir, filters)?;
        let auxiliary_report = migrate(&auxiliary, &paths.install_dir)?;
        options.enter(InstallStage::Migrated);

        let cleanup_warnings = cleanup(&paths.temp_archive_path, &paths.temp_extract_dir);
        options.enter(InstallStage::CleanedUp);

        let mut reindexed = false;
        if options.notify_host_on_success {
            if let Some(hook) = options.reindex.take() {
                hook();
                reindexed = true;
                options.enter(InstallStage::Reindexed);
            }
        }

        let skipped = primary_report
            .skipped
            .iter()
            .chain(auxiliary_report.skipped.iter())
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        let summary = InstallSummary {
            package_id: request.id.clone(),
            package_version: request.version.clone(),
            install_mode: request.install_mode,
            install_dir: paths.install_dir,
            profile: profile.candidate,
            primary_moved: primary_report.moved_count(),
            auxiliary_moved: auxiliary_report.moved_count(),
            skipped,
            cleanup_warnings,
            reindexed,
        };
        info!(
            package = %summary.package_id,
            version = %summary.package_version,
            primary = summary.primary_moved,
            auxiliary = summary.auxiliary_moved,
            skipped = summary.skipped.len(),
            "package installed"
        );
        Ok(summary)
    }
}
