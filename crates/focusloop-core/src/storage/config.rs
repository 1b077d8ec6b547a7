//! TOML-based application configuration.
//!
//! Stores the session configuration the timer engine consumes: mode
//! durations, long-break cadence, and auto-start behavior.
//!
//! Configuration is stored at `~/.config/focusloop/config.toml` and is
//! validated once at load time; the engine assumes validated values and
//! never re-checks them per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::timer::Mode;

/// Session configuration consumed by the timer engine.
///
/// All durations are epoch-free millisecond lengths and must be positive;
/// `long_break_interval` is the number of completed focus sessions between
/// long breaks and must also be positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_duration_ms")]
    pub focus_duration_ms: u64,
    #[serde(default = "default_break_duration_ms")]
    pub break_duration_ms: u64,
    #[serde(default = "default_long_break_duration_ms")]
    pub long_break_duration_ms: u64,
    #[serde(default = "default_true")]
    pub long_break_enabled: bool,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_break: bool,
    #[serde(default)]
    pub auto_start_focus: bool,
}

// Default functions
fn default_focus_duration_ms() -> u64 {
    25 * 60 * 1000
}
fn default_break_duration_ms() -> u64 {
    5 * 60 * 1000
}
fn default_long_break_duration_ms() -> u64 {
    15 * 60 * 1000
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration_ms: default_focus_duration_ms(),
            break_duration_ms: default_break_duration_ms(),
            long_break_duration_ms: default_long_break_duration_ms(),
            long_break_enabled: true,
            long_break_interval: default_long_break_interval(),
            auto_start_break: false,
            auto_start_focus: false,
        }
    }
}

impl TimerConfig {
    /// Enum-keyed mode -> duration mapping.
    pub fn duration_ms(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_duration_ms,
            Mode::Break => self.break_duration_ms,
            Mode::LongBreak => self.long_break_duration_ms,
        }
    }

    /// Whether the countdown that follows `leaving` should begin
    /// immediately instead of waiting for a manual start. The engine never
    /// reads this itself - the host picks the expiry primitive with it.
    pub fn auto_start_after(&self, leaving: Mode) -> bool {
        match leaving {
            Mode::Focus => self.auto_start_break,
            Mode::Break | Mode::LongBreak => self.auto_start_focus,
        }
    }

    /// Reject non-positive durations and intervals at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("timer.focus_duration_ms", self.focus_duration_ms),
            ("timer.break_duration_ms", self.break_duration_ms),
            ("timer.long_break_duration_ms", self.long_break_duration_ms),
        ];
        for (key, value) in durations {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "duration must be positive".to_string(),
                });
            }
        }
        if self.long_break_interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.long_break_interval".to_string(),
                message: "interval must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusloop/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Path of the config file in the application data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = super::data_dir().map_err(|e| ConfigError::DataDir(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path. Missing file writes and returns the
    /// default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.timer.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
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

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the resulting configuration fails validation, or the config cannot
    /// be saved. On error the in-memory config is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let candidate: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        candidate.timer.validate()?;
        *self = candidate;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
