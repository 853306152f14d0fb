//! Persistence backend configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which key-value backend to open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// JSON file used by the file backend.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

/// Store backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; everything is lost on exit.
    Memory,
    /// A single JSON object on disk.
    #[default]
    File,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/comptoir.json")
}
