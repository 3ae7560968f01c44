// src/core/config_loader.rs

use directories::BaseDirs;
use std::path::PathBuf;

/// User config in XDG_CONFIG_HOME/temperature-rs/config.toml
pub fn config_path() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.config_dir().join("temperature-rs").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config/config.toml"))
}
