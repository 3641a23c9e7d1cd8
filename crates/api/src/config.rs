//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the slot preview
//! server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `SLOT_MAX_RANGE_DAYS`: Longest date range a single expansion may cover (default: 62)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the slot preview server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicslots_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Maximum number of days a rule expansion may span
    pub max_range_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            max_range_days: 62,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The SLOT_MAX_RANGE_DAYS value is not a positive whole number
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.request_timeout);

        // Slot expansion limits
        let max_range_days = match env::var("SLOT_MAX_RANGE_DAYS") {
            Ok(value) => value
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| {
                    eyre::eyre!("SLOT_MAX_RANGE_DAYS must be a positive number, got {:?}", value)
                })?,
            Err(_) => defaults.max_range_days,
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            max_range_days,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
