//! Main client for the Scanboard SDK.

use crate::api::ScansApi;
use crate::config::ClientConfig;
use crate::error::{ScanError, ScanResult};
use crate::transport::HttpTransport;
use scanboard_core::{NoopRevalidator, Revalidator, Session};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the scanning backend.
#[derive(Clone)]
pub struct ScanboardClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
    pub(crate) revalidator: Arc<dyn Revalidator>,
}

impl ScanboardClient {
    /// Create a new client builder.
    pub fn builder() -> ScanboardClientBuilder {
        ScanboardClientBuilder::new()
    }

    /// Create a client configured from `API_BASE_URL`.
    pub fn from_env() -> ScanResult<Self> {
        Self::from_config(ClientConfig::from_env()?, Arc::new(NoopRevalidator))
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig, revalidator: Arc<dyn Revalidator>) -> ScanResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self {
            config,
            http,
            revalidator,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session built from the configured access token, if any.
    pub fn default_session(&self) -> Option<Session> {
        self.config.access_token.as_deref().map(Session::new)
    }

    /// Get the scans API.
    pub fn scans(&self) -> ScansApi<'_> {
        ScansApi::new(self)
    }
}

/// Builder for creating a ScanboardClient.
pub struct ScanboardClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
    revalidator: Arc<dyn Revalidator>,
}

impl ScanboardClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            access_token: None,
            timeout: None,
            revalidator: Arc::new(NoopRevalidator),
        }
    }

    /// Set the base URL of the scanning backend.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a fallback access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the route cache notified after successful actions.
    pub fn revalidator(mut self, revalidator: Arc<dyn Revalidator>) -> Self {
        self.revalidator = revalidator;
        self
    }

    /// Build the client.
    pub fn build(self) -> ScanResult<ScanboardClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| ScanError::Config("base_url is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            timeout: self.timeout,
            access_token: self.access_token,
        };

        ScanboardClient::from_config(config, self.revalidator)
    }
}

impl Default for ScanboardClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
