use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::edit::DEFAULT_SUBSTITUTION_COST;
use crate::error::ConfigError;

pub const DEFAULT_SNAPSHOT_PATH: &str = "dictionary.bin";
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// Settings for the dictionary spell checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Where the hashed dictionary snapshot is cached
    pub snapshot_path: PathBuf,
    /// Largest distance at which a nearest word is still offered
    pub max_edit_distance: usize,
    pub substitution_cost: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            substitution_cost: DEFAULT_SUBSTITUTION_COST,
        }
    }
}

impl CheckerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}
