//! Application configuration
//!
//! Optional TOML file. Every key has a default rooted at the platform data
//! directory, so a missing file (or a partial one) is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const APP_DIR: &str = "market-list";
const DB_FILE: &str = "market_list.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    /// Base name of the log file
    pub app_name: String,
    pub log_level: String,
}

/// `<data dir>/market-list`, or a relative directory when the platform has none
fn app_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl Default for AppConfig {
    fn default() -> Self {
        let dir = app_dir();
        Self {
            database_path: dir.join(DB_FILE),
            log_dir: dir.join("logs"),
            app_name: "MarketList".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; `None` or a missing file gives the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        config.log_level_filter()?;
        Ok(config)
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter, String> {
        log::LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| format!("Unknown log level: {}", self.log_level))
    }
}
