//! Scans API endpoints.

use crate::client::ScanboardClient;
use crate::error::{ErrorKind, ScanResult};
use scanboard_core::{ScanCreateRequest, ScanQuery, SessionProvider, SCANS_PATH};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

/// Scans API for listing scans and launching on-demand scans.
pub struct ScansApi<'a> {
    client: &'a ScanboardClient,
}

impl<'a> ScansApi<'a> {
    pub(crate) fn new(client: &'a ScanboardClient) -> Self {
        Self { client }
    }

    /// Backend URL for a scan listing.
    pub fn list_url(&self, query: &ScanQuery) -> ScanResult<Url> {
        let mut url = self.client.http.build_url(SCANS_PATH)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    /// List scans.
    ///
    /// An invalid page yields a validation error without contacting the
    /// backend. Once the response has been fetched and parsed, `/scans` is
    /// revalidated and the document is returned untouched, including any
    /// backend error envelope.
    pub async fn get_scans(
        &self,
        session: &dyn SessionProvider,
        query: &ScanQuery,
    ) -> ScanResult<Value> {
        query.validate()?;

        let result = self.fetch_scans(session, query).await;
        match &result {
            Ok(_) => self.client.revalidator.revalidate_path(SCANS_PATH).await,
            Err(e) if e.kind() != ErrorKind::Validation => {
                error!(error = %e, "Error fetching scans");
            }
            Err(_) => {}
        }
        result
    }

    async fn fetch_scans(
        &self,
        session: &dyn SessionProvider,
        query: &ScanQuery,
    ) -> ScanResult<Value> {
        let session = session.session().await?;
        let url = self.list_url(query)?;
        self.client.http.get(url, &session).await
    }

    /// Launch a scan from submitted form fields (`providerId`, `scanName`).
    pub async fn scan_on_demand<I, K, V>(
        &self,
        session: &dyn SessionProvider,
        form: I,
    ) -> ScanResult<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let request = ScanCreateRequest::from_form(form)?;
        self.create(session, &request).await
    }

    /// Launch a scan against a provider with the fixed on-demand check set.
    ///
    /// `/scans` is revalidated only when the scan was created.
    pub async fn create(
        &self,
        session: &dyn SessionProvider,
        request: &ScanCreateRequest,
    ) -> ScanResult<Value> {
        match self.post_scan(session, request).await {
            Ok(document) => {
                info!(provider_id = %request.provider_id, name = %request.name, "On-demand scan requested");
                self.client.revalidator.revalidate_path(SCANS_PATH).await;
                Ok(document)
            }
            Err(e) => {
                error!(error = %e, provider_id = %request.provider_id, "Error launching scan");
                Err(e)
            }
        }
    }

    async fn post_scan(
        &self,
        session: &dyn SessionProvider,
        request: &ScanCreateRequest,
    ) -> ScanResult<Value> {
        let session = session.session().await?;
        let url = self.client.http.build_url(SCANS_PATH)?;
        self.client
            .http
            .post(url, &session, &request.to_document())
            .await
    }
}
