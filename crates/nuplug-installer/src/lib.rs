mod cancel;
mod cleanup;
mod error;
mod extract;
mod fetch;
mod fs_utils;
mod layout;
mod migrate;
mod pipeline;
mod profile;
mod stage;

pub use cancel::CancelToken;
pub use cleanup::cleanup;
pub use error::{
    ExtractError, FetchError, FetchErrorKind, InstallError, MigrateError, NoMatchingProfileError,
};
pub use extract::extract;
pub use fetch::{download, Fetcher};
pub use layout::{resolve_paths, InstallLayout, InstallPaths};
pub use migrate::{collect_auxiliary_files, collect_primary_artifacts, migrate, MigrationReport};
pub use pipeline::{InstallEvent, InstallOptions, InstallSummary, Installer};
pub use profile::{select_profile, SelectedProfile};
pub use stage::InstallStage;
