//! Batch operation configuration.

use std::env;
use std::time::Duration;

/// Default per-item timeout (30 seconds - some MTP devices are slow).
pub const DEFAULT_ITEM_TIMEOUT_SECS: u64 = 30;

pub const ITEM_TIMEOUT_ENV: &str = "EXPLORER_ITEM_TIMEOUT_SECS";

/// Settings key in the frontend's flat settings store.
const ITEM_TIMEOUT_SETTING: &str = "fileOperations.itemTimeoutSecs";

/// Configuration for fail-fast batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Give up on a single item after this long. `None` waits forever.
    pub item_timeout: Option<Duration>,
}

impl BatchConfig {
    /// Load configuration from environment variables only (fallback).
    pub fn from_env() -> Self {
        Self::from_settings_and_env(None)
    }

    /// Load configuration with priority: env vars > user settings > defaults.
    ///
    /// A timeout of 0 seconds disables the timeout.
    pub fn from_settings_and_env(setting_timeout_secs: Option<u64>) -> Self {
        let secs = env::var(ITEM_TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .or(setting_timeout_secs)
            .unwrap_or(DEFAULT_ITEM_TIMEOUT_SECS);

        Self::with_timeout_secs(secs)
    }

    /// Reads the timeout from the settings store JSON (dot-notation keys), then applies env overrides.
    pub fn from_settings_json(contents: &str) -> Result<Self, serde_json::Error> {
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let setting = json.get(ITEM_TIMEOUT_SETTING).and_then(|v| v.as_u64());
        Ok(Self::from_settings_and_env(setting))
    }

    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            item_timeout: (secs > 0).then(|| Duration::from_secs(secs)),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
