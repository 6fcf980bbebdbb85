use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;
mod middleware;

use config::{AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "scanboard")]
#[command(about = "Dashboard actions for listing and launching security scans", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "scanboard.toml")]
    config: PathBuf,

    /// Scanning backend API address
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    /// Fallback access token for requests without one
    #[arg(long, env = "SCANBOARD_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Backend request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,
}

impl Args {
    /// Command line and environment take precedence over the file.
    fn apply(self, config: &mut ServerConfig) {
        if let Some(url) = self.api_base_url {
            config.backend.base_url = Some(url);
        }
        if let Some(token) = self.access_token {
            config.backend.access_token = Some(token);
        }
        if let Some(secs) = self.timeout_secs {
            config.backend.timeout_secs = Some(secs);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanboard=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting scanboard");

    // Load configuration
    let mut config = ServerConfig::load(&args.config)?;
    args.apply(&mut config);

    let state = AppState::new(&config)?;
    tracing::info!(backend = %state.client.config().base_url, "Using scanning backend");

    api::serve(&config.listen_addr(), state).await?;

    Ok(())
}
