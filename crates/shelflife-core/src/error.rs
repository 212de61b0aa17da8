//! Core error types for shelflife-core.
//!
//! Model inputs that are malformed or out of range surface as
//! [`ValidationError`] (wrapped as `CoreError::InvalidArgument`), while a
//! decay computation that is undefined in real arithmetic surfaces as
//! [`DomainError`]. Neither is retried; the same inputs fail the same way.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shelflife-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range input parameters
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Mathematically undefined decay computation
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Value outside its permitted range
    #[error("'{field}' must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Value is not one of the permitted members
    #[error("'{field}' = {value} is not a member of the temperature range")]
    NotAMember { field: String, value: f64 },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(field: &str, value: f64, min: f64, max: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }
    }
}

/// Decay-model domain errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// `(1 - k)` is negative and would be raised to a fractional power
    #[error(
        "retention factor 1 - k = {retention} is negative at {temperature}°C \
         (k = {rate}); cannot raise it to fractional time {time}"
    )]
    NegativeRetention {
        temperature: f64,
        rate: f64,
        retention: f64,
        time: f64,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse a configuration value
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be determined
    #[error("could not determine configuration directory")]
    NoConfigDir,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
