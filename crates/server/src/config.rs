use anyhow::{Context, Result};
use scanboard_core::{NoopRevalidator, Revalidator, Session};
use scanboard_sdk::ScanboardClient;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Scanning backend API address (`API_BASE_URL`)
    pub base_url: Option<String>,

    pub timeout_secs: Option<u64>,

    /// Token used when a request carries no bearer token of its own
    pub access_token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: ScanboardClient,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Self::with_revalidator(config, Arc::new(NoopRevalidator))
    }

    /// Build the state with the revalidator the actions should notify.
    pub fn with_revalidator(
        config: &ServerConfig,
        revalidator: Arc<dyn Revalidator>,
    ) -> Result<Self> {
        let base_url = config
            .backend
            .base_url
            .as_deref()
            .context("Backend base URL is not configured (set API_BASE_URL)")?;

        let mut builder = ScanboardClient::builder()
            .base_url(base_url)
            .revalidator(revalidator);
        if let Some(secs) = config.backend.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(token) = &config.backend.access_token {
            builder = builder.access_token(token.clone());
        }

        let client = builder.build().context("Failed to create backend client")?;

        Ok(Self { client })
    }

    /// Session for a request: its own bearer token, else the configured one.
    pub fn session_for(&self, from_request: Option<Session>) -> Option<Session> {
        from_request.or_else(|| self.client.default_session())
    }
}
