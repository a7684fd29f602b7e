use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::archive::ArchiveType;
use crate::filters::FileFilters;
use crate::profile::RuntimeProfiles;
use crate::request::{DEFAULT_URL_TEMPLATE, ID_LOWER_PLACEHOLDER, VERSION_LOWER_PLACEHOLDER};

pub const DATA_ROOT_ENV: &str = "NUPLUG_DATA_ROOT";
pub const CACHE_ROOT_ENV: &str = "NUPLUG_CACHE_ROOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub url_template: String,
    pub archive: String,
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            archive: ArchiveType::Nupkg.as_str().to_string(),
            timeout_secs: None,
            user_agent: format!("nuplug/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RegistryConfig {
    pub fn archive_type(&self) -> anyhow::Result<ArchiveType> {
        ArchiveType::parse(&self.archive).ok_or_else(|| {
            anyhow!(
                "unsupported archive type '{}'; supported: nupkg, zip",
                self.archive
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub plugins_dir: String,
    pub tooling_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            plugins_dir: "Plugins".to_string(),
            tooling_dir: "Editor".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    pub registry: RegistryConfig,
    pub profiles: RuntimeProfiles,
    pub files: FileFilters,
    pub layout: LayoutConfig,
}

impl InstallerConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse nuplug config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to load config file: {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let template = &self.registry.url_template;
        for placeholder in [ID_LOWER_PLACEHOLDER, VERSION_LOWER_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(anyhow!(
                    "registry url_template must contain '{placeholder}': {template}"
                ));
            }
        }
        self.registry.archive_type()?;
        self.profiles.validate()?;
        if self.files.primary_extension.trim_start_matches('.').trim().is_empty() {
            return Err(anyhow!("files.primary_extension must not be empty"));
        }
        for (key, value) in [
            ("layout.plugins_dir", &self.layout.plugins_dir),
            ("layout.tooling_dir", &self.layout.tooling_dir),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{key} must not be empty"));
            }
        }
        Ok(())
    }
}

pub fn default_data_root() -> anyhow::Result<PathBuf> {
    if let Some(root) = std::env::var_os(DATA_ROOT_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    let cwd = std::env::current_dir()
        .context("current directory is unavailable; cannot resolve data root")?;
    Ok(cwd.join("Assets"))
}

pub fn default_cache_root() -> PathBuf {
    if let Some(root) = std::env::var_os(CACHE_ROOT_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(root);
    }
    std::env::temp_dir().join("nuplug")
}
