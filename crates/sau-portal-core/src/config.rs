//! Application configuration management.
//!
//! Configuration is stored at `~/.config/sau-portal/config.json`. Every field
//! is optional; an absent file means defaults throughout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::otp::service::OTP_VALIDITY_MINUTES;

/// Application name used for config/data directory paths
const APP_NAME: &str = "sau-portal";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SAU_PORTAL_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where collections are stored. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Byte limit for the storage area, mirroring a browser's origin quota.
    pub storage_quota_bytes: Option<usize>,
    pub otp_validity_minutes: Option<i64>,
    /// When set, logs are also written to a daily file in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply overrides from the environment.
    pub fn with_env(mut self) -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn otp_validity(&self) -> Duration {
        let minutes = self
            .otp_validity_minutes
            .filter(|m| *m > 0)
            .unwrap_or(OTP_VALIDITY_MINUTES);
        Duration::minutes(minutes)
    }
}
