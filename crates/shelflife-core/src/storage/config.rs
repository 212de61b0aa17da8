//! TOML-based scenario configuration.
//!
//! Holds the inputs of one evaluation:
//! - Battery parameters (initial charge, reference rate and temperature)
//! - Storage duration as months/days/hours
//! - Temperature range and highlighted pair
//! - Rate policy for runaway decay rates
//!
//! Configuration is stored at `~/.config/shelflife/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::decay::{RatePolicy, DEFAULT_BASE_RATE_PER_MONTH, DEFAULT_BASE_TEMP_CELSIUS};
use crate::error::ConfigError;

/// Battery model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryConfig {
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity_percent: u32,
    #[serde(default = "default_base_temp")]
    pub base_temp_celsius: f64,
    #[serde(default = "default_base_rate")]
    pub base_rate_per_month: f64,
    /// Nominal capacity (Ah); enables charge and current estimates.
    #[serde(default)]
    pub nominal_capacity_ah: Option<f64>,
}

/// Storage duration configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub hours: u32,
}

/// Temperature range configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureConfig {
    #[serde(default = "default_min_temp")]
    pub min: i32,
    #[serde(default = "default_max_temp")]
    pub max: i32,
    #[serde(default = "default_temp_step")]
    pub step: i32,
}

/// Highlighted band endpoints; unset endpoints fall back to the first two
/// members of the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    #[serde(default)]
    pub start: Option<i32>,
    #[serde(default)]
    pub end: Option<i32>,
}

/// Model behaviour configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub rate_policy: RatePolicy,
}

/// Scenario configuration.
///
/// Serialized to/from TOML at `~/.config/shelflife/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub battery: BatteryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub temperature: TemperatureConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

// Default functions
fn default_initial_capacity() -> u32 {
    100
}
fn default_base_temp() -> f64 {
    DEFAULT_BASE_TEMP_CELSIUS
}
fn default_base_rate() -> f64 {
    DEFAULT_BASE_RATE_PER_MONTH
}
fn default_months() -> u32 {
    1
}
fn default_min_temp() -> i32 {
    -15
}
fn default_max_temp() -> i32 {
    40
}
fn default_temp_step() -> i32 {
    5
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            initial_capacity_percent: default_initial_capacity(),
            base_temp_celsius: default_base_temp(),
            base_rate_per_month: default_base_rate(),
            nominal_capacity_ah: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            months: default_months(),
            days: 0,
            hours: 0,
        }
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            min: default_min_temp(),
            max: default_max_temp(),
            step: default_temp_step(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // `null` clears optional values; required fields reject it below.
                let new_value = match existing {
                    _ if value == "null" => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| parse_failed(key, value, "a boolean"))?,
                    serde_json::Value::Number(_) => parse_number(value)
                        .ok_or_else(|| parse_failed(key, value, "a number"))?,
                    // Unset optional values: numbers where possible, otherwise text.
                    serde_json::Value::Null => parse_number(value)
                        .unwrap_or_else(|| serde_json::Value::String(value.into())),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)
            .map_err(|e| ConfigError::ParseFailed(format!("{key}: {e}")))?;
        Ok(())
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<i64>() {
        Some(serde_json::Value::Number(n.into()))
    } else {
        value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
    }
}

fn parse_failed(key: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::ParseFailed(format!("cannot parse '{value}' as {expected} for {key}"))
}
