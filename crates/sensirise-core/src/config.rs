//! TOML-based application configuration.
//!
//! The config file is the only thing read from disk: it seeds the in-memory
//! registry at startup and points the CLI at an optional classifier
//! endpoint. Nothing is ever written back; alarm state lives in memory only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alarm::ChallengeKind;
use crate::error::ConfigError;

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_label() -> String {
    "Alarm".to_string()
}

fn default_true() -> bool {
    true
}

/// One alarm definition as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmSpec {
    /// 24-hour `"HH:MM"`; validated when the registry is seeded.
    pub time: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default)]
    pub challenge: ChallengeKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Classifier endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the JSON vision endpoint (trailing slash recommended).
    pub endpoint: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scheduler cadence; once per second is sufficient for minute-granular
    /// matching.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Fixed seed for challenge content; None draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub classifier: Option<ClassifierConfig>,

    #[serde(default, rename = "alarm")]
    pub alarms: Vec<AlarmSpec>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}
