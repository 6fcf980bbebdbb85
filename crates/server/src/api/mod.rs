use crate::config::AppState;
use anyhow::Result;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use scanboard_core::SCANS_PATH;
use scanboard_sdk::ErrorKind;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;

/// Start the dashboard action server
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard actions listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            SCANS_PATH,
            get(handlers::list_scans).post(handlers::scan_on_demand),
        )
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scanboard",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// HTTP status reported for a failed action
pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Upstream => StatusCode::UNAUTHORIZED,
        ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Network | ErrorKind::Parse => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use scanboard_core::RecordingRevalidator;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORM: &str = "application/x-www-form-urlencoded";

    fn create_state(base_url: &str, access_token: Option<&str>) -> AppState {
        let mut config = ServerConfig::default();
        config.backend.base_url = Some(base_url.to_string());
        config.backend.access_token = access_token.map(str::to_string);
        AppState::new(&config).unwrap()
    }

    fn create_recording_state(base_url: &str) -> (AppState, Arc<RecordingRevalidator>) {
        let mut config = ServerConfig::default();
        config.backend.base_url = Some(base_url.to_string());
        let recorder = Arc::new(RecordingRevalidator::new());
        let state = AppState::with_revalidator(&config, recorder.clone()).unwrap();
        (state, recorder)
    }

    async fn body_json_of(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_scans(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer user-token")
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(body: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/scans")
            .header(header::CONTENT_TYPE, FORM);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_state("http://127.0.0.1:1", None));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json_of(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_invalid_page_redirects() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&server)
            .await;

        let app = create_router(create_state(&server.uri(), None));

        for uri in ["/scans?page=0", "/scans?page=abc", "/scans?page=-2"] {
            let response = app.clone().oneshot(get_scans(uri)).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers()[header::LOCATION], "/scans");
        }
    }

    #[tokio::test]
    async fn test_list_scans_forwards_query() {
        let server = MockServer::start().await;
        let listing = json!({"data": [{"type": "Scan", "id": "s-1"}]});

        Mock::given(method("GET"))
            .and(path("/scans"))
            .and(query_param("page[number]", "2"))
            .and(query_param("filter[search]", "aws"))
            .and(query_param("sort", "-name"))
            .and(query_param("filter[region]", "us-east-1"))
            .and(wiremock::matchers::header("Authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let (state, recorder) = create_recording_state(&server.uri());
        let app = create_router(state);
        let uri = "/scans?page=2&query=aws&sort=-name&filter%5Bregion%5D=us-east-1";

        let response = app.oneshot(get_scans(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json_of(response).await, listing);
        assert_eq!(recorder.paths(), vec!["/scans"]);
    }

    #[tokio::test]
    async fn test_repeated_listing_reaches_backend_each_time() {
        let server = MockServer::start().await;
        let executing = json!({"data": [{"type": "Scan", "id": "s-1", "attributes": {"state": "executing"}}]});
        let completed = json!({"data": [{"type": "Scan", "id": "s-1", "attributes": {"state": "completed"}}]});

        Mock::given(method("GET"))
            .and(path("/scans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(executing))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/scans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completed))
            .expect(1)
            .mount(&server)
            .await;

        let app = create_router(create_state(&server.uri(), None));

        let first = body_json_of(app.clone().oneshot(get_scans("/scans")).await.unwrap()).await;
        let second = body_json_of(app.oneshot(get_scans("/scans")).await.unwrap()).await;

        assert_eq!(first["data"][0]["attributes"]["state"], "executing");
        assert_eq!(second["data"][0]["attributes"]["state"], "completed");
    }

    #[tokio::test]
    async fn test_list_scans_backend_down() {
        let app = create_router(create_state("http://127.0.0.1:1", None));

        let response = app.oneshot(get_scans("/scans")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json_of(response).await, Value::Null);
    }

    #[tokio::test]
    async fn test_scan_on_demand_revalidates_listing() {
        let server = MockServer::start().await;
        let created = json!({"data": {"type": "Scan", "id": "s-2"}});

        Mock::given(method("GET"))
            .and(path("/scans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/scans"))
            .and(body_json(json!({
                "data": {
                    "type": "Scan",
                    "attributes": {
                        "name": "My scan",
                        "scanner_args": {"checks_to_execute": ["accessanalyzer_enabled"]}
                    },
                    "relationships": {
                        "provider": {"data": {"type": "Provider", "id": "prov-1"}}
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let (state, recorder) = create_recording_state(&server.uri());
        let app = create_router(state);

        let response = app
            .oneshot(post_form("providerId=prov-1&scanName=My+scan", Some("user-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json_of(response).await, created);
        assert_eq!(recorder.paths(), vec!["/scans"]);
    }

    #[tokio::test]
    async fn test_scan_on_demand_failure_returns_error_object() {
        let (state, recorder) = create_recording_state("http://127.0.0.1:1");
        let app = create_router(state);

        let response = app
            .oneshot(post_form("providerId=prov-1&scanName=x", Some("user-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json_of(response).await;
        assert!(body["error"].as_str().is_some_and(|m| m.starts_with("HTTP error")));
        assert_eq!(recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_scan_on_demand_without_session() {
        let app = create_router(create_state("http://127.0.0.1:1", None));

        let response = app
            .oneshot(post_form("providerId=prov-1&scanName=x", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json_of(response).await,
            json!({"error": "Authentication failed: no active session"})
        );
    }

    #[tokio::test]
    async fn test_scan_on_demand_uses_fallback_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/scans"))
            .and(wiremock::matchers::header("Authorization", "Bearer svc-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "s-3"}})))
            .expect(1)
            .mount(&server)
            .await;

        let app = create_router(create_state(&server.uri(), Some("svc-token")));

        let response = app
            .oneshot(post_form("providerId=prov-1&scanName=x", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_scan_on_demand_missing_field() {
        let app = create_router(create_state("http://127.0.0.1:1", None));

        let response = app
            .oneshot(post_form("scanName=x", Some("user-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json_of(response).await,
            json!({"error": "missing form field: providerId"})
        );
    }

    #[tokio::test]
    async fn test_scan_on_demand_rejects_non_form_body() {
        let app = create_router(create_state("http://127.0.0.1:1", None));

        let request = Request::builder()
            .method("POST")
            .uri("/scans")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer user-token")
            .body(Body::from(r#"{"providerId":"prov-1"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json_of(response).await;
        assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
    }
}
