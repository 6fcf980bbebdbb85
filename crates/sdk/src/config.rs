//! Configuration types for the Scanboard SDK.

use crate::error::{ScanError, ScanResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding the backend base address.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Configuration for the Scanboard client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the scanning backend API, e.g. `https://api.example.com/api/v1`.
    pub base_url: Url,
    /// Request timeout. `None` waits on the backend indefinitely.
    pub timeout: Option<Duration>,
    /// Access token used when the caller supplies no session of its own.
    pub access_token: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            access_token: None,
        }
    }

    /// Read the base URL from `API_BASE_URL`.
    pub fn from_env() -> ScanResult<Self> {
        let raw = std::env::var(API_BASE_URL_ENV)
            .map_err(|_| ScanError::Config(format!("{} is not set", API_BASE_URL_ENV)))?;
        Self::parse(&raw)
    }

    /// Parse a base URL string into a configuration.
    pub fn parse(base_url: &str) -> ScanResult<Self> {
        if base_url.trim().is_empty() {
            return Err(ScanError::Config("base_url is empty".to_string()));
        }
        Ok(Self::new(Url::parse(base_url)?))
    }
}
