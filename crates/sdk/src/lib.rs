//! # Scanboard SDK
//!
//! Rust client for the scan actions of a security-scanning backend:
//! listing scans and launching on-demand scans.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scanboard_sdk::{ScanQuery, ScanboardClient, ScanResult, Session};
//!
//! #[tokio::main]
//! async fn main() -> ScanResult<()> {
//!     let client = ScanboardClient::builder()
//!         .base_url("https://api.example.com/api/v1")
//!         .build()?;
//!
//!     let session = Session::new("access-token");
//!     let query = ScanQuery::new().page(1).sort("-inserted_at");
//!
//!     let scans = client.scans().get_scans(&session, &query).await?;
//!     println!("{}", scans);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Route revalidation
//!
//! Both actions notify a [`Revalidator`] after they succeed so a
//! dashboard can drop cached renders of `/scans`:
//!
//! ```rust,no_run
//! use scanboard_sdk::{RecordingRevalidator, ScanboardClient};
//! use std::sync::Arc;
//!
//! # fn example() -> scanboard_sdk::ScanResult<()> {
//! let recorder = Arc::new(RecordingRevalidator::new());
//! let client = ScanboardClient::builder()
//!     .base_url("https://api.example.com")
//!     .revalidator(recorder.clone())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{ScanboardClient, ScanboardClientBuilder};
pub use config::{ClientConfig, API_BASE_URL_ENV};
pub use error::{ErrorKind, ErrorResponse, ScanError, ScanResult};

// Re-export core types for convenience
pub use scanboard_core::{
    api_errors, ApiErrorObject, NoopRevalidator, RecordingRevalidator, Revalidator,
    ScanAttributes, ScanCreateRequest, ScanListDocument, ScanQuery, ScanResource, Session,
    SessionError, SessionProvider, StaticSession, ValidationError, SCANS_PATH,
};
