use anyhow::anyhow;
use serde::{Deserialize, Serialize};

pub const NETSTANDARD_2_0: &str = "lib/netstandard2.0";
pub const NETSTANDARD_2_1: &str = "lib/netstandard2.1";

/// Ordered runtime-profile candidates, most preferred first. Each entry is a
/// directory path relative to the extraction root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeProfiles(Vec<String>);

impl RuntimeProfiles {
    pub fn new<I, S>(candidates: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let profiles = Self(candidates.into_iter().map(Into::into).collect());
        profiles.validate()?;
        Ok(profiles)
    }

    pub fn candidates(&self) -> &[String] {
        &self.0
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.0.is_empty() {
            return Err(anyhow!("at least one runtime profile must be configured"));
        }
        for candidate in &self.0 {
            let trimmed = candidate.trim();
            if trimmed.is_empty() {
                return Err(anyhow!("runtime profile entries must not be empty"));
            }
            if trimmed.starts_with('/') || trimmed.split(['/', '\\']).any(|part| part == "..") {
                return Err(anyhow!(
                    "runtime profile '{candidate}' must be relative to the package root"
                ));
            }
        }
        Ok(())
    }
}

impl Default for RuntimeProfiles {
    fn default() -> Self {
        Self(vec![NETSTANDARD_2_0.to_string(), NETSTANDARD_2_1.to_string()])
    }
}
