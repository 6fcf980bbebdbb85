use thiserror::Error;

/// Input rejected before any request is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Page number is not a positive integer.
    #[error("invalid page number: {0:?}")]
    InvalidPage(String),

    /// A required form field was absent.
    #[error("missing form field: {0}")]
    MissingField(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
