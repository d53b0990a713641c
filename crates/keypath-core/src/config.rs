//! Access-path configuration, loaded from TOML.
//!
//! ```toml
//! [planner]
//! group_indexes = true
//! reverse_scans = true
//! ```
//!
//! Absent tables and keys take their defaults; unknown keys are rejected.

use crate::error::InternalError;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid access-path config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::config_internal(err.to_string())
    }
}

///
/// AccessPathConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AccessPathConfig {
    pub planner: PlannerConfig,
}

impl AccessPathConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }
}

///
/// PlannerConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Consider group indexes whose leaf is the planned table.
    pub group_indexes: bool,
    /// Allow SORTED credit that requires scanning the index backward.
    pub reverse_scans: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            group_indexes: true,
            reverse_scans: true,
        }
    }
}

///
/// TESTS
///
