//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Required values are validated eagerly so
//! a misconfigured deployment fails at boot instead of on the first request.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// The analysis worker's webhook URL. Submissions cannot be dispatched
    /// without it, so its absence is a startup error.
    pub webhook_url: String,
    /// Shared secret the worker must present on the ingestion callback.
    pub callback_secret: String,
    /// How long an unread result set survives in the store.
    pub result_ttl: Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        // --- Load External Collaborator Settings (required) ---
        let webhook_url = std::env::var("WEBHOOK_URL")
            .map_err(|_| ConfigError::MissingVar("WEBHOOK_URL".to_string()))?;
        let callback_secret = std::env::var("CALLBACK_SECRET")
            .map_err(|_| ConfigError::MissingVar("CALLBACK_SECRET".to_string()))?;

        let ttl_str = std::env::var("RESULT_TTL_SECS").unwrap_or_else(|_| "3600".to_string());
        let result_ttl = ttl_str
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidValue("RESULT_TTL_SECS".to_string(), e.to_string())
            })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            webhook_url,
            callback_secret,
            result_ttl,
            log_level,
        })
    }
}
