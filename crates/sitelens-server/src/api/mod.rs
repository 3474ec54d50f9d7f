mod analyze;
mod scrape;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use sitelens_agent::Analyzer;
use sitelens_cache::ProfileCache;
use sitelens_core::BusinessProfile;
use sitelens_scraper::PageClient;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ProfileCache>,
    pub analyzer: Arc<Analyzer>,
    pub pages: Arc<PageClient>,
}

/// Success envelope: a fully-shaped profile plus whether it came from cache.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub data: BusinessProfile,
    pub cached: bool,
}

/// Failure envelope; the HTTP status is carried out of band.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Validates `url` from a request body: present, non-empty, parseable.
///
/// The exact error strings are part of the HTTP contract.
pub(super) fn validate_url(url: Option<&str>) -> Result<String, ApiError> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("URL is required"))?;
    url::Url::parse(url).map_err(|_| ApiError::bad_request("Invalid URL format"))?;
    Ok(url.to_owned())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Website Analysis API is running",
        "endpoints": {
            "analyze": "POST /analyze-website",
            "scrape": "POST /scrape-website",
        },
    }))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze-website", post(analyze::analyze_website))
        .route("/scrape-website", post(scrape::scrape_website))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use sitelens_agent::AgentClient;

    use super::*;

    const TTL_SECS: u64 = 86_400;

    /// App wired to the given mock agent server, plus a handle that moves
    /// the cache's clock.
    fn test_app(agent_server_uri: &str) -> (Router, Arc<Mutex<DateTime<Utc>>>) {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let now = Arc::new(Mutex::new(start));
        let clock_handle = Arc::clone(&now);

        let agent_client = AgentClient::with_base_url("sk-test", "gpt-5", agent_server_uri)
            .expect("test AgentClient");
        let state = AppState {
            cache: Arc::new(ProfileCache::with_clock(
                TTL_SECS,
                Box::new(move || *now.lock().expect("clock mutex poisoned")),
            )),
            analyzer: Arc::new(Analyzer::new(agent_client, 5)),
            pages: Arc::new(PageClient::new(5, "sitelens-test/0.1").expect("test PageClient")),
        };
        (build_app(state), clock_handle)
    }

    fn advance(clock: &Arc<Mutex<DateTime<Utc>>>, secs: i64) {
        let mut now = clock.lock().expect("clock mutex poisoned");
        *now += Duration::seconds(secs);
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    fn acme_answer() -> serde_json::Value {
        let record = json!({
            "name": "Acme Corp",
            "website": "https://acme.com",
            "contact": { "email": "hello@acme.com" },
            "socialMedia": {}
        });
        json!({ "content": record.to_string() })
    }

    async fn mount_agent(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(acme_answer()))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn missing_url_is_rejected() {
        let server = MockServer::start().await;
        let (app, _clock) = test_app(&server.uri());

        let response = app
            .oneshot(post_json("/analyze-website", json!({})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "URL is required");
    }

    #[tokio::test]
    async fn bodyless_post_gets_envelope_error() {
        let server = MockServer::start().await;
        let (app, _clock) = test_app(&server.uri());

        for uri in ["/analyze-website", "/scrape-website"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
            let body = body_json(response).await;
            assert_eq!(body["success"], false, "uri: {uri}");
            assert_eq!(body["error"], "URL is required", "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn unparseable_body_gets_envelope_error() {
        let server = MockServer::start().await;
        let (app, _clock) = test_app(&server.uri());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze-website")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "URL is required");
    }

    #[tokio::test]
    async fn malformed_url_is_rejected() {
        let server = MockServer::start().await;
        let (app, _clock) = test_app(&server.uri());

        let response = app
            .oneshot(post_json("/analyze-website", json!({ "url": "not a url" })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid URL format");
    }

    #[tokio::test]
    async fn second_request_within_ttl_is_served_from_cache() {
        let server = MockServer::start().await;
        mount_agent(&server, 1).await;
        let (app, _clock) = test_app(&server.uri());

        let first = app
            .clone()
            .oneshot(post_json("/analyze-website", json!({ "url": "https://acme.com" })))
            .await
            .expect("first response");
        assert_eq!(first.status(), StatusCode::OK);
        let first_body = body_json(first).await;
        assert_eq!(first_body["success"], true);
        assert_eq!(first_body["cached"], false);
        assert_eq!(first_body["data"]["name"], "Acme Corp");

        let second = app
            .oneshot(post_json("/analyze-website", json!({ "url": "https://acme.com" })))
            .await
            .expect("second response");
        let second_body = body_json(second).await;
        assert_eq!(second_body["cached"], true);
        assert_eq!(second_body["data"], first_body["data"]);
    }

    #[tokio::test]
    async fn urls_differing_by_case_or_query_share_one_cache_entry() {
        let server = MockServer::start().await;
        mount_agent(&server, 1).await;
        let (app, _clock) = test_app(&server.uri());

        let first = app
            .clone()
            .oneshot(post_json(
                "/analyze-website",
                json!({ "url": "HTTP://Acme.com/About" }),
            ))
            .await
            .expect("first response");
        assert_eq!(body_json(first).await["cached"], false);

        let second = app
            .oneshot(post_json(
                "/analyze-website",
                json!({ "url": "http://acme.com/About?utm=1" }),
            ))
            .await
            .expect("second response");
        assert_eq!(body_json(second).await["cached"], true);
    }

    #[tokio::test]
    async fn expired_entry_triggers_fresh_extraction() {
        let server = MockServer::start().await;
        mount_agent(&server, 2).await;
        let (app, clock) = test_app(&server.uri());

        let first = app
            .clone()
            .oneshot(post_json("/analyze-website", json!({ "url": "https://acme.com" })))
            .await
            .expect("first response");
        assert_eq!(body_json(first).await["cached"], false);

        advance(&clock, i64::try_from(TTL_SECS).unwrap() + 1);

        let second = app
            .oneshot(post_json("/analyze-website", json!({ "url": "https://acme.com" })))
            .await
            .expect("second response");
        assert_eq!(body_json(second).await["cached"], false);
    }

    #[tokio::test]
    async fn agent_failure_maps_to_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let (app, _clock) = test_app(&server.uri());

        let response = app
            .oneshot(post_json("/analyze-website", json!({ "url": "https://acme.com" })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(
            body["error"].as_str().unwrap_or_default().contains("500"),
            "error should mention upstream status: {body}"
        );
    }

    #[tokio::test]
    async fn scrape_endpoint_extracts_from_markup() {
        let agent = MockServer::start().await;
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Acme Corp</title></head>\
                 <body>sales@acme.com</body></html>",
            ))
            .mount(&site)
            .await;
        let (app, _clock) = test_app(&agent.uri());

        let response = app
            .oneshot(post_json("/scrape-website", json!({ "url": site.uri() })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["cached"], false);
        assert_eq!(body["data"]["name"], "Acme Corp");
        assert_eq!(body["data"]["contact"]["email"], "sales@acme.com");
    }

    #[tokio::test]
    async fn health_lists_endpoints() {
        let server = MockServer::start().await;
        let (app, _clock) = test_app(&server.uri());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["endpoints"]["analyze"], "POST /analyze-website");
    }
}
