use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://credisource-production.up.railway.app";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CredisourceConfig {
    pub api: Option<ApiConfig>,
    pub polling: Option<PollingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PollingConfig {
    pub interval_ms: Option<u64>,
    pub max_attempts: Option<u32>,
}

/// Fully resolved settings after CLI, environment and file have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Explicit overrides from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct SettingOverrides {
    pub base_url: Option<String>,
    pub interval_ms: Option<u64>,
    pub max_attempts: Option<u32>,
}

impl ResolvedSettings {
    /// Overrides win over the file, the file wins over built-in defaults.
    pub fn resolve(file: Option<&CredisourceConfig>, overrides: &SettingOverrides) -> Self {
        let defaults = Self::default();
        let api = file.and_then(|c| c.api.as_ref());
        let polling = file.and_then(|c| c.polling.as_ref());

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| api.and_then(|a| a.base_url.clone()))
            .unwrap_or(defaults.base_url);

        let request_timeout = api
            .and_then(|a| a.request_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let poll_interval = overrides
            .interval_ms
            .or_else(|| polling.and_then(|p| p.interval_ms))
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        let max_attempts = overrides
            .max_attempts
            .or_else(|| polling.and_then(|p| p.max_attempts))
            .unwrap_or(defaults.max_attempts);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            poll_interval,
            max_attempts,
        }
    }
}
