use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nuplug_core::{default_cache_root, default_data_root, InstallMode, PackageRequest};
use nuplug_installer::Installer;
use tracing_subscriber::EnvFilter;

mod flows;
mod render;

use flows::{load_config, run_install, run_paths, InstallFlags};
use render::current_output_style;

#[derive(Parser, Debug)]
#[command(name = "nuplug")]
#[command(about = "Install NuGet package binaries into a project plugin folder", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults are used when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Project data root that receives `Plugins/`.
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,
    /// Scratch dir for the downloaded archive and its extraction.
    #[arg(long, global = true)]
    cache_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct PackageArgs {
    id: String,
    version: String,
    /// Install into the tooling-only (`Plugins/Editor`) location.
    #[arg(long)]
    tooling_only: bool,
}

impl PackageArgs {
    fn request(&self) -> PackageRequest {
        let mode = if self.tooling_only {
            InstallMode::ToolingOnly
        } else {
            InstallMode::Standard
        };
        PackageRequest::new(&self.id, &self.version).with_install_mode(mode)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download a package and install its binaries (dependencies are not followed).
    Install {
        #[command(flatten)]
        package: PackageArgs,
        /// Skip the host reindex notification after a successful install.
        #[arg(long)]
        no_reindex: bool,
        /// Shell command run as the host reindex notification.
        #[arg(long)]
        reindex_command: Option<String>,
        /// Print the install summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the download URL and local paths without touching disk or network.
    Paths {
        #[command(flatten)]
        package: PackageArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let data_root = match cli.data_root {
        Some(root) => root,
        None => default_data_root()?,
    };
    let cache_root = cli.cache_root.unwrap_or_else(default_cache_root);
    let installer = Installer::new(config, data_root, cache_root)?;

    match cli.command {
        Commands::Install {
            package,
            no_reindex,
            reindex_command,
            json,
        } => {
            let flags = InstallFlags {
                notify_host: !no_reindex,
                reindex_command,
                json,
            };
            run_install(&installer, &package.request(), &flags)?;
        }
        Commands::Paths { package } => {
            run_paths(&installer, &package.request(), current_output_style());
        }
    }

    Ok(())
}
