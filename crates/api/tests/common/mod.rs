#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use relay_core::engine::WorkflowEngine;
use relay_core::error::EngineError;
use relay_core::lifecycle::JobLifecycleService;
use relay_core::store::{InMemoryJobStore, JobStore};
use tower::ServiceExt;

use relay_api::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use relay_api::router::build_app_router;
use relay_api::state::AppState;

/// Engine double answering every start request with a fixed outcome.
pub struct StubEngine {
    /// Body to return, or the HTTP status to fail with.
    pub response: Result<serde_json::Value, u16>,
}

impl StubEngine {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { response: Ok(body) }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
        }
    }
}

#[async_trait]
impl WorkflowEngine for StubEngine {
    async fn start_job(&self) -> Result<serde_json::Value, EngineError> {
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(EngineError::Status {
                status: *status,
                body: "internal engine details: token=abc123".into(),
            }),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        engine_start_url: "http://engine.test/webhook/start-job".to_string(),
        database_url: None,
        result_ttl: None,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        static_dir: None,
    }
}

/// Build the full application router around the given store, engine, and
/// config, mirroring `main.rs`.
pub fn build_app_with(
    store: Arc<dyn JobStore>,
    engine: StubEngine,
    config: ServerConfig,
) -> Router {
    let service = JobLifecycleService::new(store, Arc::new(engine));
    let state = AppState { service };
    build_app_router(state, &config)
}

/// Build the app with an in-memory store and a healthy engine. The store
/// is returned so tests can inspect it.
pub fn build_test_app() -> (Router, Arc<InMemoryJobStore>) {
    build_test_app_with_engine(StubEngine::ok(serde_json::json!({ "jobId": "JOB-1678907890" })))
}

pub fn build_test_app_with_engine(engine: StubEngine) -> (Router, Arc<InMemoryJobStore>) {
    let store = Arc::new(InMemoryJobStore::new());
    let app = build_app_with(store.clone(), engine, test_config());
    (app, store)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw body and a JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
