//! Storage location from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory name used under the platform data directory
pub const DATA_DIR_NAME: &str = "ue5-qgen";

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding one JSON file per stored key
    pub data_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured directory, else `$XDG_DATA_HOME/ue5-qgen`, else
    /// `./.ue5-qgen`
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(DATA_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIR_NAME)))
    }
}
