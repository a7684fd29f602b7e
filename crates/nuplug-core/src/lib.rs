mod archive;
mod config;
mod filters;
mod profile;
mod request;

pub use archive::ArchiveType;
pub use config::{
    default_cache_root, default_data_root, InstallerConfig, LayoutConfig, RegistryConfig,
    CACHE_ROOT_ENV, DATA_ROOT_ENV,
};
pub use filters::FileFilters;
pub use profile::{RuntimeProfiles, NETSTANDARD_2_0, NETSTANDARD_2_1};
pub use request::{
    build_download_url, expand_url_template, InstallMode, PackageRequest, DEFAULT_URL_TEMPLATE,
    ID_LOWER_PLACEHOLDER, VERSION_LOWER_PLACEHOLDER,
};
