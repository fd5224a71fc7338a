use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// The default base URL of the course-registration API.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// The client's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The base URL of the remote service, resolved once at startup.
    pub api_base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// `API_BASE_URL` falls back to the local development service;
    /// `REQUEST_TIMEOUT_SECS` falls back to 30.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS")?;

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Creates a `Config` pointing at an explicit base URL (tests, embedding).
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout: Duration::from_secs(30),
        }
    }
}
