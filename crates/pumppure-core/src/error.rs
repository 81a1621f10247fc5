//! Core error types for pumppure-core.
//!
//! Invalid player actions are not errors: the engine reports them as
//! feedback events and keeps running. The error hierarchy below covers the
//! surfaces that can actually fail -- configuration files and tuning values.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pumppure-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to prepare the configuration directory
    #[error("failed to prepare configuration directory {path}: {message}")]
    DirFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors for tuning values.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Required-pump-count range is empty or zero
    #[error("invalid pump-count range [{min}, {max}]: min must be >= 1 and <= max")]
    InvalidPumpCountRange { min: u64, max: u64 },

    /// Invalid value
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
