//! Configuration model for the gmdesk data layer.

use serde::{Deserialize, Serialize};

/// Main configuration structure for gmdesk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP transport configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Page size new list controllers start with (1-200)
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

const fn default_page_size() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            default_page_size: default_page_size(),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Base URL of the console backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session token sent as the `x-token` header
    #[serde(default)]
    pub token: String,

    /// Operator id sent as the `x-user-id` header
    #[serde(default)]
    pub user_id: String,

    /// Fixed request timeout in seconds. Deliberately long: the only
    /// resilience measure against slow backends, there is no retry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8888".to_string()
}

const fn default_timeout_secs() -> u64 {
    100
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            user_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
