use crate::error::ConfigError;
use core_types::{Granularity, RangePreset};
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the trade report endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the reporting service, without a trailing path.
    pub base_url: String,
    /// Sent verbatim as the `api_key` query parameter.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Defaults for what the dashboard shows on start-up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_range: RangePreset,
    pub default_granularity: Granularity,
    pub rows_per_page: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `api_client=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bot.tradeum.ai".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_range: RangePreset::Last30Days,
            default_granularity: Granularity::Daily,
            rows_per_page: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make every request or page render fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("api.timeout_secs must be positive".into()));
        }
        if self.dashboard.rows_per_page == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.rows_per_page must be positive".into(),
            ));
        }
        Ok(())
    }
}
