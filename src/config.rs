use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::icons::{self, Icon};
use crate::settings::RDP_SCHEMA;

/// Application configuration.
///
/// Every field has a default, so running without a config file is fine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Display name; also used for the published status item.
    #[serde(default = "default_name")]
    pub name: String,
    /// Settings schema holding the screen-share keys.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Directory containing `extend.svg` and `mirror.svg`.
    #[serde(default = "default_icons_dir")]
    pub icons_dir: PathBuf,
}

fn default_name() -> String {
    "Screen Share Toggle".to_string()
}

fn default_schema() -> String {
    RDP_SCHEMA.to_string()
}

fn default_icons_dir() -> PathBuf {
    PathBuf::from("/usr/share/screenshare-toggle/icons")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            schema: default_schema(),
            icons_dir: default_icons_dir(),
        }
    }
}

impl Config {
    /// File path for `icon` under this configuration's icons directory.
    pub fn icon_path(&self, icon: Icon) -> PathBuf {
        icons::resolve_icon_path(&self.icons_dir, icon)
    }

    /// Name under which the indicator is published.
    pub fn indicator_title(&self) -> String {
        format!("{} Indicator", self.name)
    }
}

/// Loads configuration from a YAML file, or defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config = serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            Ok(config)
        }
        None => {
            tracing::info!("No config file given, using defaults");
            Ok(Config::default())
        }
    }
}
