//! Configuration loading and representation.
//!
//! Values come from `POCKETBOOK_*` environment variables, optionally seeded
//! from a `.env` file in the working directory.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::repository::DEFAULT_STORAGE_KEY;

pub const ENV_DATA_DIR: &str = "POCKETBOOK_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "POCKETBOOK_STORAGE_KEY";
pub const ENV_LOG: &str = "POCKETBOOK_LOG";
pub const ENV_LOG_FORMAT: &str = "POCKETBOOK_LOG_FORMAT";

/// Configuration errors with structured variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no data directory: set POCKETBOOK_DATA_DIR or pass --data-dir")]
    NoDataDir,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: ENV_LOG_FORMAT,
                reason: format!("'{other}' is not one of: pretty, json"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the stored ledger.
    pub data_dir: PathBuf,
    /// Key the transaction array is stored under.
    pub storage_key: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment (after reading `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Like [`Config::from_env`], with an optional data directory (e.g. from a
    /// CLI flag) taking precedence over the environment.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(with_data_dir(data_dir, |name| std::env::var(name).ok()))
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = match value(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };
        let storage_key = value(ENV_STORAGE_KEY).unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let log_filter = value(ENV_LOG).unwrap_or_else(|| "info".to_string());
        let log_format = match value(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let config = Self {
            data_dir,
            storage_key,
            log_filter,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let key_ok = !self.storage_key.starts_with('.')
            && self
                .storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !key_ok {
            return Err(ConfigError::InvalidValue {
                field: ENV_STORAGE_KEY,
                reason: format!("'{}' may only contain letters, digits, '-', '_' and '.'", self.storage_key),
            });
        }
        Ok(())
    }
}

/// Lookup that answers `POCKETBOOK_DATA_DIR` with `data_dir` when given.
fn with_data_dir(
    data_dir: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> impl Fn(&str) -> Option<String> {
    let data_dir = data_dir.map(|dir| dir.to_string_lossy().into_owned());
    move |name: &str| match (&data_dir, name) {
        (Some(dir), ENV_DATA_DIR) => Some(dir.clone()),
        _ => lookup(name),
    }
}

/// Platform data directory joined with `pocketbook`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("pocketbook"))
}
