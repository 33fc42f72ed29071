//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Game tuning (starting coins, task goal, quest price, long break cadence)
//! - Text-generation provider settings
//! - Appearance
//!
//! Configuration is stored at `~/.config/pomoquest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::ledger::{DEFAULT_STARTING_COINS, DEFAULT_TASK_REWARD_THRESHOLD};
use crate::quest::DEFAULT_QUEST_COST;
use crate::session::durations::{DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_WORK_SECS};
use crate::session::SessionState;
use crate::snapshot::{Snapshot, Theme};

/// Game tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u64,
    #[serde(default = "default_task_reward_threshold")]
    pub task_reward_threshold: u32,
    #[serde(default = "default_quest_cost")]
    pub quest_cost: u64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
}

/// Remote text-generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Takes precedence over the environment and the keyring.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Lower bound on how long a quest request takes, so progress is visible.
    #[serde(default = "default_quest_latency_ms")]
    pub quest_latency_ms: u64,
    #[serde(default = "default_news_latency_ms")]
    pub news_latency_ms: u64,
    /// Look the API key up in the OS keyring.
    #[serde(default = "default_true")]
    pub keyring: bool,
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomoquest/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_starting_coins() -> u64 {
    DEFAULT_STARTING_COINS
}
fn default_task_reward_threshold() -> u32 {
    DEFAULT_TASK_REWARD_THRESHOLD
}
fn default_quest_cost() -> u64 {
    DEFAULT_QUEST_COST
}
fn default_long_break_interval() -> u32 {
    DEFAULT_LONG_BREAK_INTERVAL
}
fn default_work_minutes() -> u32 {
    DEFAULT_WORK_SECS / 60
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_quest_latency_ms() -> u64 {
    1200
}
fn default_news_latency_ms() -> u64 {
    500
}
fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: default_starting_coins(),
            task_reward_threshold: default_task_reward_threshold(),
            quest_cost: default_quest_cost(),
            long_break_interval: default_long_break_interval(),
            work_minutes: default_work_minutes(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            quest_latency_ms: default_quest_latency_ms(),
            news_latency_ms: default_news_latency_ms(),
            keyring: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Returns `~/.config/pomoquest[-dev]/`, or `$POMOQUEST_HOME` when set.
///
/// Set POMOQUEST_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOQUEST_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomoquest-dev")
            } else {
                base_dir.join("pomoquest")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|e| invalid(e.to_string()))?
                            .into(),
                    ),
                    // Empty input unsets optional strings; required ones then
                    // fail to deserialize.
                    serde_json::Value::Null | serde_json::Value::String(_) if value.is_empty() => {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Null | serde_json::Value::String(_) => {
                        serde_json::Value::String(value.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

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
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by key in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Snapshot a new game starts from.
    pub fn initial_snapshot(&self) -> Snapshot {
        Snapshot {
            coins: self.game.starting_coins,
            session: SessionState::new(self.game.work_minutes.saturating_mul(60)),
            task_reward_threshold: self.game.task_reward_threshold.max(1),
            theme: if self.ui.dark_mode {
                Theme::Dark
            } else {
                Theme::Light
            },
            ..Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[game]\nquest_cost = 25\n").unwrap();
        assert_eq!(parsed.game.quest_cost, 25);
        assert_eq!(parsed.game.starting_coins, 50);
        assert_eq!(parsed.provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("game.long_break_interval").as_deref(), Some("4"));
        assert_eq!(cfg.get("provider.api_key").as_deref(), Some("null"));
        assert!(cfg.get("ui.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("game.quest_cost", "15").unwrap();
        cfg.set("provider.keyring", "false").unwrap();
        cfg.set("provider.api_key", "secret").unwrap();
        assert_eq!(cfg.game.quest_cost, 15);
        assert!(!cfg.provider.keyring);
        assert_eq!(cfg.provider.api_key.as_deref(), Some("secret"));

        cfg.set("provider.api_key", "").unwrap();
        assert_eq!(cfg.provider.api_key, None);
        assert!(cfg.set("provider.model", "").is_err());
        assert_eq!(cfg.provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("ui.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("ui.dark_mode", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.set("", "x").is_err());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.ui.dark_mode = false;
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn initial_snapshot_uses_game_settings() {
        let mut cfg = Config::default();
        cfg.game.starting_coins = 100;
        cfg.game.work_minutes = 25;
        cfg.ui.dark_mode = false;
        let state = cfg.initial_snapshot();
        assert_eq!(state.coins, 100);
        assert_eq!(state.session.work_duration_secs, 1500);
        assert_eq!(state.session.break_duration_secs, 300);
        assert_eq!(state.theme, Theme::Light);
    }
}
