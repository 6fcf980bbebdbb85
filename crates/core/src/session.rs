use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Authenticated session handed out by the auth provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no active session")]
    Unauthenticated,

    #[error("session provider failed: {0}")]
    Provider(String),
}

/// Source of the caller's session.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self) -> Result<Session, SessionError>;
}

#[async_trait::async_trait]
impl SessionProvider for Session {
    async fn session(&self) -> Result<Session, SessionError> {
        Ok(self.clone())
    }
}

#[async_trait::async_trait]
impl SessionProvider for Option<Session> {
    async fn session(&self) -> Result<Session, SessionError> {
        self.clone().ok_or(SessionError::Unauthenticated)
    }
}

#[async_trait::async_trait]
impl<T: SessionProvider + ?Sized> SessionProvider for Arc<T> {
    async fn session(&self) -> Result<Session, SessionError> {
        (**self).session().await
    }
}

/// Provider that always returns the same token, e.g. a service account.
#[derive(Debug, Clone)]
pub struct StaticSession {
    session: Session,
}

impl StaticSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            session: Session::new(access_token),
        }
    }
}

#[async_trait::async_trait]
impl SessionProvider for StaticSession {
    async fn session(&self) -> Result<Session, SessionError> {
        Ok(self.session.clone())
    }
}
