use axum::http::{header, HeaderMap};
use scanboard_core::Session;

/// Extract the caller's session from the authorization header.
///
/// The token is forwarded to the backend unchanged; verifying it is the
/// auth provider's job.
pub fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    let auth_header = headers.get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;

    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(Session::new(token))
    }
}
