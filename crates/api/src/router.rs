//! The HTTP surface of the grocery service.
//!
//! ```text
//! GET    /health                         store health, never an error status
//! GET    /api/v1/items                   list
//! POST   /api/v1/items                   create (201)
//! PUT    /api/v1/items/{id}              partial update
//! PUT    /api/v1/items/{id}/purchased    set purchase status
//! DELETE /api/v1/items/{id}              idempotent delete
//! POST   /api/v1/rpc                     every operation through one endpoint
//! ```
//!
//! The binary and the integration tests both build the app through
//! [`build_app_router`], so they run behind the same middleware.

use std::time::Duration;

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::config::{CorsOrigins, ServerConfig};
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request id, set when the client sends none.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Preflight responses may be cached this long by browsers.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Build the application with its middleware.
///
/// Requests pass the layers in this order: CORS, request id assignment,
/// tracing, request id propagation onto the response, timeout (408), panic
/// recovery (500).
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(build_cors_layer(&config.cors_origins))
        .map_response(|res: axum::response::Response<_>| res.map(axum::body::Body::new))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::new());

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(middleware)
        .with_state(state)
}

/// CORS for the configured origins. The browser client only sends JSON
/// bodies, so `Content-Type` is the one allowed request header.
pub fn build_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}

/// One span per request, tagged with its request id.
fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}
