use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// How [`WorldGrid::set`](crate::WorldGrid::set) refreshes the run index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum RebuildPolicy {
    /// Discard and regenerate every run.
    #[default]
    #[serde(rename = "full")]
    Full,
    /// Regenerate only the edited row; the result is identical to `Full`.
    #[serde(rename = "row")]
    RowLocal,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub rebuild: RebuildPolicy,
}

impl WorldConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
