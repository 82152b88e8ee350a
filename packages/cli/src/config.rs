use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagesmith.config.json";

/// Pagesmith configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the document store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// User the CLI acts as (page owner)
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Undo history depth per edit session
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,
}

fn default_data_dir() -> String {
    ".pagesmith".to_string()
}

fn default_user_id() -> String {
    "local-user".to_string()
}

fn default_undo_levels() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            user_id: default_user_id(),
            undo_levels: default_undo_levels(),
        }
    }
}
