#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use grocery_api::config::{CorsOrigins, ServerConfig};
use grocery_api::router::build_app_router;
use grocery_api::state::AppState;
use grocery_db::{ItemStore, MemoryItemStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:5173")]),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
    }
}

/// A fresh in-memory item store.
pub fn memory_store() -> Arc<dyn ItemStore> {
    Arc::new(MemoryItemStore::new())
}

/// Build the full application router, with all middleware layers, over the
/// given store. Clone the returned router to send several requests against
/// the same store.
pub fn build_test_app(store: Arc<dyn ItemStore>) -> Router {
    build_test_app_with_config(store, &test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn ItemStore>, config: &ServerConfig) -> Router {
    build_app_router(AppState::new(store), config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
