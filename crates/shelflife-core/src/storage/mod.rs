mod config;

pub use config::{BatteryConfig, Config, HighlightConfig, ModelConfig, StorageConfig, TemperatureConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SHELFLIFE_CONFIG_DIR";

/// Returns `$SHELFLIFE_CONFIG_DIR` if set, otherwise `~/.config/shelflife/`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(".config")
            .join("shelflife"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
