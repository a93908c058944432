use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for Virtswitch.
///
/// Loaded from `~/.config/virtswitch/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub log: LogConfig,
    /// Restart scheduling settings.
    pub restart: RestartConfig,
}

/// Restart scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Delay in seconds preselected in the restart menu. Must be one of
    /// the offered choices; other values fall back to the first choice.
    pub default_delay_secs: u32,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            default_delay_secs: 300,
        }
    }
}

/// Returns the config directory: `~/.config/virtswitch/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("virtswitch"))
}

/// Returns the config file path: `~/.config/virtswitch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// If the file doesn't exist, returns defaults silently.
/// If the file exists but can't be parsed, warns and returns defaults.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Config::default(),
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to parse {}: {e}", path.display());
            Config::default()
        }
    }
}

/// Serializes the default configuration for `virtswitch init`.
pub fn default_toml() -> String {
    toml::to_string_pretty(&Config::default())
        .unwrap_or_default()
}
