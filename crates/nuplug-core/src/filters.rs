use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileFilters {
    /// Extension (without the dot) of binary artifacts inside the profile dir.
    pub primary_extension: String,
    /// Case-insensitive name endings of root-level files installed alongside.
    pub auxiliary_suffixes: Vec<String>,
}

impl Default for FileFilters {
    fn default() -> Self {
        Self {
            primary_extension: "dll".to_string(),
            auxiliary_suffixes: vec![".txt".to_string(), ".md".to_string(), "license".to_string()],
        }
    }
}

impl FileFilters {
    pub fn is_primary(&self, path: &Path) -> bool {
        let wanted = self.primary_extension.trim_start_matches('.');
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }

    pub fn is_auxiliary(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.auxiliary_suffixes
            .iter()
            .any(|suffix| lower.ends_with(&suffix.to_lowercase()))
    }
}
