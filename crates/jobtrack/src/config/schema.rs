use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::GoalSpec;
use crate::view::ViewState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Where file and sqlite backends keep their data. Defaults to
    /// `~/.jobtrack`.
    #[serde(default)]
    pub data_directory: Option<String>,
    #[serde(default)]
    pub backend: StorageBackend,
    /// View, sort and filters applied when the tracker opens.
    #[serde(default)]
    pub view: ViewState,
    /// Goal used until the user saves their own.
    #[serde(default)]
    pub goal: GoalSpec,
    /// Days after which the last export counts as stale.
    #[serde(default = "default_stale_export_days")]
    pub stale_export_days: u32,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_stale_export_days() -> u32 {
    7
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_directory: None,
            backend: StorageBackend::default(),
            view: ViewState::default(),
            goal: GoalSpec::default(),
            stale_export_days: default_stale_export_days(),
        }
    }
}

impl TrackerConfig {
    /// The configured data directory, else the platform default.
    pub fn resolve_data_directory(&self) -> Option<PathBuf> {
        match &self.data_directory {
            Some(dir) => Some(PathBuf::from(dir)),
            None => default_data_directory(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Sqlite,
}

/// Returns the canonical data directory: `~/.jobtrack`.
pub fn default_data_directory() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".jobtrack"))
}
