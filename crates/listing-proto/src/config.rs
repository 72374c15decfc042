use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Card geometry, in terminal cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Terminals narrower than this use the stacked (mobile) layout.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u16,
    #[serde(default = "default_image_box_width")]
    pub image_box_width: u16,
    #[serde(default = "default_image_box_height")]
    pub image_box_height: u16,
    /// Columns left free beside the image box in the stacked layout.
    #[serde(default = "default_mobile_margin")]
    pub mobile_margin: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Listing feed opened when no path is given on the command line.
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: default_mobile_breakpoint(),
            image_box_width: default_image_box_width(),
            image_box_height: default_image_box_height(),
            mobile_margin: default_mobile_margin(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_mobile_breakpoint() -> u16 {
    80
}

fn default_image_box_width() -> u16 {
    28
}

fn default_image_box_height() -> u16 {
    10
}

fn default_mobile_margin() -> u16 {
    4
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing defaults there first if it does not exist yet.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("wrote default config to {}", path.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
