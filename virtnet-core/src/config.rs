//! Configuration management.

use crate::error::{NetStatError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent configuration for virtnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub libvirt_run_dir: String,
    pub sysfs_net_dir: String,
    /// Report host tap counters from the guest's point of view
    pub swap_tap_counters: bool,
    /// Share one statistics round-trip per interface within a batch collection
    pub batch_fetch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            libvirt_run_dir: paths::DEFAULT_LIBVIRT_RUN_DIR.to_string(),
            sysfs_net_dir: paths::DEFAULT_SYSFS_NET_DIR.to_string(),
            swap_tap_counters: true,
            batch_fetch: true,
        }
    }
}

impl Config {
    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| NetStatError::InvalidConfig {
            reason: format!("Failed to read config {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| NetStatError::InvalidConfig {
            reason: format!("Failed to parse config {}: {}", path.display(), e),
        })
    }

    /// Load configuration from a path the user named explicitly.
    ///
    /// Unlike `load_from`, a missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NetStatError::InvalidConfig {
                reason: format!("Config file {} does not exist", path.display()),
            });
        }
        Self::load_from(path)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| NetStatError::IoError { path: parent.to_path_buf(), source: e })?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| NetStatError::InvalidConfig {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content)
            .map_err(|e| NetStatError::IoError { path: path.to_path_buf(), source: e })
    }
}
