//! HTTP transport layer for the Scanboard SDK.

use crate::config::ClientConfig;
use crate::error::{ScanError, ScanResult};
use reqwest::{header, Client, RequestBuilder};
use scanboard_core::{Session, JSON_API_MEDIA_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// HTTP transport for making JSON:API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> ScanResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(JSON_API_MEDIA_TYPE),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Build a URL for the given path.
    ///
    /// The path is appended to the base URL, so a base path such as
    /// `/api/v1` is kept. Any query or fragment on the base URL is dropped.
    pub fn build_url(&self, path: &str) -> ScanResult<Url> {
        let mut url = self.config.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| ScanError::Config("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        Ok(url)
    }

    /// Execute a request and parse the body as JSON.
    ///
    /// Non-success statuses are not errors: the backend reports failures
    /// inside its JSON:API document, which is handed back as-is.
    async fn execute(&self, request: RequestBuilder, session: &Session) -> ScanResult<Value> {
        let response = request.bearer_auth(session.access_token()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a GET request.
    pub async fn get(&self, url: Url, session: &Session) -> ScanResult<Value> {
        debug!(url = %url, "GET request");
        self.execute(self.client.get(url), session).await
    }

    /// Execute a POST request with a JSON:API body.
    pub async fn post<B: Serialize>(&self, url: Url, session: &Session, body: &B) -> ScanResult<Value> {
        debug!(url = %url, "POST request");

        let body = serde_json::to_vec(body).map_err(ScanError::Json)?;
        let request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)
            .body(body);

        self.execute(request, session).await
    }
}
