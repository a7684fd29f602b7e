use std::fmt;

use serde::Serialize;

/// Linear install state machine. Failure at any step ends the run; no step
/// is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallStage {
    Init,
    DirEnsured,
    Downloaded,
    Extracted,
    ProfileSelected,
    Migrated,
    CleanedUp,
    Reindexed,
}

impl InstallStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::DirEnsured => "dir-ensured",
            Self::Downloaded => "downloaded",
            Self::Extracted => "extracted",
            Self::ProfileSelected => "profile-selected",
            Self::Migrated => "migrated",
            Self::CleanedUp => "cleaned-up",
            Self::Reindexed => "reindexed",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
