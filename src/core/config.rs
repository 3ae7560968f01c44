// src/core/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::sensors::CounterSourceKind;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SysfsConfig {
    pub thermal_base: PathBuf,
    pub hwmon_base: PathBuf,
    pub cpu_base: PathBuf,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        SysfsConfig {
            thermal_base: PathBuf::from("/sys/class/thermal"),
            hwmon_base: PathBuf::from("/sys/class/hwmon"),
            cpu_base: PathBuf::from("/sys/devices/system/cpu"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    // Where counters are read from
    #[serde(default)]
    pub source: CounterSourceKind,

    // Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub sysfs: SysfsConfig,
}

impl Config {
    // Loads the user config if present, defaults otherwise
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = ?path, "No user config found; using defaults");
            return Ok(Config::default());
        }

        info!(path = ?path, "Reading user configuration");
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading user config at {path:?}"))?;
        let cfg = Self::from_toml_str(&text)
            .with_context(|| format!("Parsing user config at {path:?}"))?;

        info!(?cfg, "Configuration loaded successfully");
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        if cfg.log_level.trim().is_empty() {
            Err(anyhow::anyhow!("log_level must not be empty"))?
        }
        Ok(cfg)
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: CounterSourceKind::default(),
            log_level: default_log_level(),
            sysfs: SysfsConfig::default(),
        }
    }
}
