//! Core runtime configuration.
//!
//! # Responsibility
//! - Load core settings from a JSON file once at startup.
//! - Provide defaults for every setting so an empty file is valid.
//!
//! # Invariants
//! - Unknown keys are rejected rather than silently ignored.
//! - Loading never mutates process-global state.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default simulated remote-call latency for cat creation.
pub const DEFAULT_CAT_CREATE_DELAY_MS: u64 = 1000;

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Settings consumed by the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Latency the cat handler adds before each create.
    pub cat_create_delay_ms: u64,
    /// One of `trace|debug|info|warn|error`; build default when unset.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file; an in-memory database is used when unset.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cat_create_delay_ms: DEFAULT_CAT_CREATE_DELAY_MS,
            log_level: None,
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    /// - `Parse` on malformed JSON, wrong value types, or unknown keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn cat_create_delay(&self) -> Duration {
        Duration::from_millis(self.cat_create_delay_ms)
    }

    /// Effective log level, falling back to the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        match self.log_level.as_deref() {
            Some(level) => level,
            None => default_log_level(),
        }
    }

    /// Looks up one top-level setting by key.
    ///
    /// Returns `None` for unknown keys and for unset optional settings.
    pub fn setting(&self, key: &str) -> Option<Value> {
        match serde_json::to_value(self).ok()? {
            Value::Object(mut map) => map.remove(key).filter(|value| !value.is_null()),
            _ => None,
        }
    }
}
