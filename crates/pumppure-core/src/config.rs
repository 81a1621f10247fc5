//! TOML-based game configuration.
//!
//! Stores player preferences and tuning knobs:
//! - Default difficulty for new rounds
//! - Pump penalty and the required-pump-count range
//! - Optional fixed RNG seed for reproducible rounds
//!
//! Configuration is stored at `~/.config/pumppure/config.toml`
//! (`PUMPPURE_ENV=dev` switches to `~/.config/pumppure-dev/`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::difficulty::Difficulty;
use crate::error::{ConfigError, ValidationError};

/// Gameplay tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Points lost when pumping while the water is contaminated.
    #[serde(default = "default_pump_penalty")]
    pub pump_penalty: u32,
    /// Fewest pumps a round may require to fill the meter.
    #[serde(default = "default_pump_count_min")]
    pub pump_count_min: u64,
    /// Most pumps a round may require to fill the meter.
    #[serde(default = "default_pump_count_max")]
    pub pump_count_max: u64,
}

fn default_pump_penalty() -> u32 {
    1
}
fn default_pump_count_min() -> u64 {
    25
}
fn default_pump_count_max() -> u64 {
    35
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pump_penalty: default_pump_penalty(),
            pump_count_min: default_pump_count_min(),
            pump_count_max: default_pump_count_max(),
        }
    }
}

impl Tuning {
    /// Reject ranges the per-round sampler cannot satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pump_count_min == 0 || self.pump_count_min > self.pump_count_max {
            return Err(ValidationError::InvalidPumpCountRange {
                min: self.pump_count_min,
                max: self.pump_count_max,
            });
        }
        Ok(())
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pumppure/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Difficulty used when a round does not name one.
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tuning: Tuning,
    /// Fixed RNG seed for reproducible rounds (unset = OS entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Returns `~/.config/pumppure[-dev]/` based on PUMPPURE_ENV.
///
/// # Errors
///
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PUMPPURE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pumppure-dev")
    } else {
        base_dir.join("pumppure")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the existing type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the field's type, or the resulting config is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(String::new()));
        }

        let mut current = &mut json;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let new_value = parse_as_existing_type(existing, value).map_err(|message| {
                    ConfigError::InvalidValue {
                        key: key.to_string(),
                        message,
                    }
                })?;
                let _ = obj.insert(part.to_string(), new_value);
                break;
            }
            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated
            .tuning
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        *self = updated;
        Ok(())
    }
}

/// Parse `value` into the JSON type `existing` already holds. `null` fields
/// (the optional seed) accept either a number or "none" to clear.
fn parse_as_existing_type(
    existing: &serde_json::Value,
    value: &str,
) -> Result<serde_json::Value, String> {
    match existing {
        serde_json::Value::Bool(_) => value
            .parse::<bool>()
            .map(serde_json::Value::Bool)
            .map_err(|e| e.to_string()),
        serde_json::Value::Number(_) => value
            .parse::<u64>()
            .map(|n| serde_json::Value::Number(n.into()))
            .map_err(|_| format!("cannot parse '{value}' as number")),
        serde_json::Value::Null => {
            if value.eq_ignore_ascii_case("none") {
                Ok(serde_json::Value::Null)
            } else {
                value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| format!("cannot parse '{value}' as number or 'none'"))
            }
        }
        _ => Ok(serde_json::Value::String(value.into())),
    }
}
