//! Example: listing scans.
//!
//! Reads the backend address from `API_BASE_URL` and the token from
//! `SCANBOARD_ACCESS_TOKEN`, then prints the first page of completed scans.
//!
//! Run with: cargo run --example list_scans

use scanboard_sdk::{ScanListDocument, ScanQuery, ScanResult, ScanboardClient, StaticSession};

#[tokio::main]
async fn main() -> ScanResult<()> {
    tracing_subscriber::fmt::init();

    let client = ScanboardClient::from_env()?;
    let session = StaticSession::new(std::env::var("SCANBOARD_ACCESS_TOKEN").unwrap_or_default());

    let query = ScanQuery::new()
        .page(1)
        .sort("-inserted_at")
        .filter("filter[state]", "completed");

    println!("GET {}", client.scans().list_url(&query)?);
    let document = client.scans().get_scans(&session, &query).await?;

    if let Some(errors) = scanboard_sdk::api_errors(&document) {
        for err in errors {
            println!("Backend error: {}", err.detail.unwrap_or_default());
        }
        return Ok(());
    }

    let scans = ScanListDocument::from_value(document)?;
    println!(
        "Found {} scans (pages: {})",
        scans.data.len(),
        scans.total_pages().unwrap_or(1)
    );

    for scan in &scans.data {
        println!(
            "  {} {:?} state={:?} provider={:?}",
            scan.id,
            scan.attributes.name,
            scan.attributes.state,
            scan.provider_id()
        );
    }

    Ok(())
}
