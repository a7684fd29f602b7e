use serde::{Deserialize, Serialize};

pub const ID_LOWER_PLACEHOLDER: &str = "{id-lower}";
pub const VERSION_LOWER_PLACEHOLDER: &str = "{version-lower}";

/// Flat-container download endpoint of the public NuGet gallery.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://api.nuget.org/v3-flatcontainer/{id-lower}/{version-lower}/{id-lower}.{version-lower}.nupkg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallMode {
    #[default]
    Standard,
    ToolingOnly,
}

impl InstallMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ToolingOnly => "tooling-only",
        }
    }
}

/// A single package to fetch and install. Dependencies are never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub id: String,
    pub version: String,
    pub install_mode: InstallMode,
}

impl PackageRequest {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            install_mode: InstallMode::Standard,
        }
    }

    pub fn with_install_mode(mut self, install_mode: InstallMode) -> Self {
        self.install_mode = install_mode;
        self
    }

    /// `{id}-{version}`, shared by the temp archive and temp extraction names.
    pub fn scratch_stem(&self) -> String {
        format!("{}-{}", self.id, self.version)
    }

    pub fn download_url(&self, template: &str) -> String {
        expand_url_template(template, &self.id, &self.version)
    }
}

pub fn build_download_url(id: &str, version: &str) -> String {
    expand_url_template(DEFAULT_URL_TEMPLATE, id, version)
}

/// Substitutes the lower-cased id and version. No escaping is performed;
/// callers must pass registry-safe identifiers.
pub fn expand_url_template(template: &str, id: &str, version: &str) -> String {
    template
        .replace(ID_LOWER_PLACEHOLDER, &id.to_lowercase())
        .replace(VERSION_LOWER_PLACEHOLDER, &version.to_lowercase())
}
