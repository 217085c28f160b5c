use std::path::{Path, PathBuf};
use std::time::Duration;

use pagecraft_editor::{EditorConfig, DEFAULT_HISTORY_LIMIT};
use pagecraft_live_edit::ResolutionChain;
use pagecraft_model::Locale;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding drafts, published records and global settings
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Locale given to pages created from scratch
    #[serde(default)]
    pub default_locale: Locale,

    /// Undo history entries kept per editing session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Save dirty drafts on this interval while an editing session runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosave_seconds: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Skip the positional fallback when resolving live edits
    #[serde(default)]
    pub disable_positional_resolution: bool,
}

fn default_storage_dir() -> String {
    ".pagecraft".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", DEFAULT_CONFIG_NAME, e))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path to the storage directory
    pub fn storage_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.storage_dir)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
            autosave_interval: self.autosave_seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }

    pub fn resolution_chain(&self) -> ResolutionChain {
        if self.disable_positional_resolution {
            ResolutionChain::without_positional()
        } else {
            ResolutionChain::standard()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            default_locale: Locale::En,
            history_limit: default_history_limit(),
            autosave_seconds: None,
            log_level: None,
            disable_positional_resolution: false,
        }
    }
}
