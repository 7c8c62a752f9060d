//! Configuration loader with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid default_page_size: {0}. Must be between 1 and 200")]
    InvalidPageSize(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. gmdesk.yaml (project config)
    /// 3. Environment variables (GMDESK_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("gmdesk.yaml"))
            .merge(Env::prefixed("GMDESK_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.http.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !config.http.base_url.starts_with("http://")
            && !config.http.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidBaseUrl(config.http.base_url.clone()));
        }
        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }
        if config.default_page_size == 0 || config.default_page_size > 200 {
            return Err(ConfigError::InvalidPageSize(config.default_page_size));
        }
        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
        match config.logging.format.as_str() {
            "json" | "pretty" => {}
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
        Ok(())
    }
}
