//! Example: launching an on-demand scan.
//!
//! Run with: cargo run --example scan_on_demand -- <provider-id> [scan-name]

use scanboard_sdk::{ErrorResponse, ScanboardClient, ScanResult, Session};

#[tokio::main]
async fn main() -> ScanResult<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let provider_id = args.next().unwrap_or_default();
    let scan_name = args.next().unwrap_or_else(|| "on-demand".to_string());

    let client = ScanboardClient::from_env()?;
    let session = Session::new(std::env::var("SCANBOARD_ACCESS_TOKEN").unwrap_or_default());

    let form = [("providerId", provider_id), ("scanName", scan_name)];
    match client.scans().scan_on_demand(&session, form).await {
        Ok(created) => println!("{}", serde_json::to_string_pretty(&created)?),
        Err(e) => println!("{}", serde_json::to_string(&ErrorResponse::from(&e))?),
    }

    Ok(())
}
