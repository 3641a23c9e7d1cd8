use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::env;

/// Connection settings for the remote scheduling API.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the scheduling API (required)
    pub base_url: String,
    /// Per-request timeout in seconds (defaults to 15)
    pub timeout_seconds: u64,
    /// Pre-issued bearer token, seeded into the session when present
    pub token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SCHEDULING_API_URL")
            .map_err(|_| eyre!("SCHEDULING_API_URL environment variable not set"))?;

        let timeout_seconds = env::var("SCHEDULING_API_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .wrap_err("SCHEDULING_API_TIMEOUT_SECONDS must be a whole number of seconds")?;

        let token = env::var("SCHEDULING_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            base_url,
            timeout_seconds,
            token,
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
