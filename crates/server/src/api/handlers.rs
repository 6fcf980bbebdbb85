use super::status_for;
use crate::config::AppState;
use crate::middleware::auth::session_from_headers;
use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use scanboard_core::{ScanQuery, ValidationError, SCANS_PATH};
use scanboard_sdk::{ErrorKind, ErrorResponse};
use serde_json::Value;
use std::sync::Arc;

/// List scans
///
/// Accepts `page`, `query`, `sort` and any `filter[...]` parameter. A bad
/// page number redirects to the first page.
pub async fn list_scans(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let query = match scan_query_from_params(&params) {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Redirecting invalid scan listing request");
            return Redirect::to(SCANS_PATH).into_response();
        }
    };

    let session = state.session_for(session_from_headers(&headers));

    match state.client.scans().get_scans(&session, &query).await {
        Ok(document) => Json(document).into_response(),
        Err(e) if e.kind() == ErrorKind::Validation => Redirect::to(SCANS_PATH).into_response(),
        Err(e) => (status_for(e.kind()), Json(Value::Null)).into_response(),
    }
}

/// Launch an on-demand scan from a submitted form
pub async fn scan_on_demand(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let Form(fields) = match form {
        Ok(form) => form,
        Err(rejection) => {
            let body = ErrorResponse {
                error: rejection.body_text(),
            };
            return (rejection.status(), Json(body)).into_response();
        }
    };

    let session = state.session_for(session_from_headers(&headers));

    match state.client.scans().scan_on_demand(&session, fields).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => (status_for(e.kind()), Json(ErrorResponse::from(&e))).into_response(),
    }
}

fn scan_query_from_params(params: &[(String, String)]) -> Result<ScanQuery, ValidationError> {
    let mut query = ScanQuery::default();

    for (key, value) in params {
        match key.as_str() {
            "page" => query.page = ScanQuery::parse_page(value)?,
            "query" => query.query = value.clone(),
            "sort" => query.sort = value.clone(),
            k if k.starts_with("filter[") => {
                query.filters.insert(k.to_string(), value.clone());
            }
            _ => {}
        }
    }

    Ok(query)
}
