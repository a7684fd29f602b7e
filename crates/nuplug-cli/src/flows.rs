use std::cell::RefCell;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use nuplug_core::{InstallerConfig, PackageRequest};
use nuplug_installer::{InstallEvent, InstallOptions, InstallSummary, Installer};
use tracing::{info, warn};

use crate::render::{render_status_line, OutputStyle, TerminalRenderer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InstallFlags {
    pub(crate) notify_host: bool,
    pub(crate) reindex_command: Option<String>,
    pub(crate) json: bool,
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<InstallerConfig> {
    match path {
        Some(path) => InstallerConfig::load(path),
        None => Ok(InstallerConfig::default()),
    }
}

pub(crate) fn run_install(
    installer: &Installer,
    request: &PackageRequest,
    flags: &InstallFlags,
) -> Result<InstallSummary> {
    let renderer = TerminalRenderer::current();
    let progress = RefCell::new(if flags.json {
        None
    } else {
        Some(renderer.start_download("download"))
    });

    let mut options = InstallOptions::new()
        .notify_host(flags.notify_host)
        .with_observer(|event| {
            if let InstallEvent::Download { downloaded, total } = event {
                if let Some(progress) = progress.borrow_mut().as_mut() {
                    progress.set(*downloaded, *total);
                }
            }
        });
    if let Some(command) = flags.reindex_command.clone() {
        options = options.with_reindex(move || notify_host(&command));
    } else if flags.notify_host {
        info!("no reindex command configured; host will not be notified");
    }

    let result = installer.install_package(request, options);
    let progress = progress.into_inner();
    let summary = match result {
        Ok(summary) => {
            if let Some(progress) = progress {
                progress.finish_success();
            }
            summary
        }
        Err(err) => {
            if let Some(progress) = progress {
                progress.finish_abandon();
            }
            let stage = err.stage();
            return Err(anyhow::Error::new(err).context(format!(
                "failed to install {} {} (stage: {stage})",
                request.id, request.version
            )));
        }
    };

    if flags.json {
        let rendered = serde_json::to_string_pretty(&summary)
            .context("failed to serialize install summary")?;
        println!("{rendered}");
        return Ok(summary);
    }

    renderer.print_section(&format!(
        "Installed {} {}",
        summary.package_id, summary.package_version
    ));
    renderer.print_lines(&format_install_summary_lines(&summary, renderer.style()));
    Ok(summary)
}

pub(crate) fn run_paths(installer: &Installer, request: &PackageRequest, style: OutputStyle) {
    TerminalRenderer::from_style(style).print_lines(&format_paths_lines(installer, request, style));
}

pub(crate) fn format_paths_lines(
    installer: &Installer,
    request: &PackageRequest,
    style: OutputStyle,
) -> Vec<String> {
    let paths = installer.resolve_paths(request);
    vec![
        render_status_line(style, "url", &installer.download_url(request)),
        render_status_line(
            style,
            "install",
            &paths.install_dir.display().to_string(),
        ),
        render_status_line(
            style,
            "archive",
            &paths.temp_archive_path.display().to_string(),
        ),
        render_status_line(
            style,
            "extract",
            &paths.temp_extract_dir.display().to_string(),
        ),
    ]
}

pub(crate) fn format_install_summary_lines(
    summary: &InstallSummary,
    style: OutputStyle,
) -> Vec<String> {
    let mut lines = vec![
        render_status_line(
            style,
            "ok",
            &format!(
                "installed {} {} ({})",
                summary.package_id,
                summary.package_version,
                summary.install_mode.as_str()
            ),
        ),
        render_status_line(style, "step", &format!("profile: {}", summary.profile)),
        render_status_line(
            style,
            "step",
            &format!(
                "moved: {} primary, {} auxiliary",
                summary.primary_moved, summary.auxiliary_moved
            ),
        ),
        render_status_line(
            style,
            "step",
            &format!("install_dir: {}", summary.install_dir.display()),
        ),
    ];

    if !summary.skipped.is_empty() {
        lines.push(render_status_line(
            style,
            "step",
            &format!("skipped_existing: {}", summary.skipped.join(", ")),
        ));
    }
    for warning in &summary.cleanup_warnings {
        lines.push(render_status_line(
            style,
            "warn",
            &format!("warning: {warning}"),
        ));
    }
    if summary.reindexed {
        lines.push(render_status_line(style, "step", "host reindex requested"));
    }

    lines
}

/// Host reindex hook. Failures are reported but never fail the install.
fn notify_host(command: &str) {
    match run_command(&mut shell_command(command), "reindex command failed") {
        Ok(()) => info!(command, "host reindex command finished"),
        Err(err) => warn!("{err:#}"),
    }
}

pub(crate) fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut shell = Command::new("cmd");
        shell.arg("/C").arg(command);
        shell
    } else {
        let mut shell = Command::new("sh");
        shell.arg("-c").arg(command);
        shell
    }
}

pub(crate) fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}
