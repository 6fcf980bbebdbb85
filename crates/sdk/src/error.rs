//! Error types for the Scanboard SDK.

use scanboard_core::{SessionError, ValidationError};
use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Broad classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller input was rejected before any request was made.
    Validation,
    /// The request never produced a response.
    Network,
    /// The response body was not JSON.
    Parse,
    /// A collaborator other than the backend transport failed (auth provider).
    Upstream,
    /// Client misconfiguration.
    Config,
}

/// Error types that can occur when using the Scanboard SDK.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No session could be obtained.
    #[error("Authentication failed: {0}")]
    Session(#[from] SessionError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            // Body decoding failures surface through reqwest as well
            Self::Http(e) if e.is_decode() => ErrorKind::Parse,
            Self::Http(_) => ErrorKind::Network,
            Self::Json(_) => ErrorKind::Parse,
            Self::Session(_) => ErrorKind::Upstream,
            Self::Config(_) | Self::InvalidUrl(_) => ErrorKind::Config,
        }
    }

    /// Human-readable message suitable for showing to a dashboard user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// `{"error": "..."}` body returned to the dashboard when an action fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ScanError> for ErrorResponse {
    fn from(err: &ScanError) -> Self {
        Self {
            error: err.message(),
        }
    }
}
