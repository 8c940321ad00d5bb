use axum::extract::State;
use axum::{routing::get, Json, Router};
use grocery_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the item store is unreachable.
    pub status: &'static str,
    /// Server time when the check ran.
    pub timestamp: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Which item store backs this server (`postgres` or `memory`).
    pub store: &'static str,
    /// Whether the item store is reachable.
    pub store_healthy: bool,
}

/// Probe the item store and report. Never fails.
pub async fn health_status(state: &AppState) -> HealthResponse {
    let store = state.items.store();
    let store_healthy = match store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, backend = store.backend(), "Item store health check failed");
            false
        }
    };

    HealthResponse {
        status: if store_healthy { "ok" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        store: store.backend(),
        store_healthy,
    }
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_status(&state).await)
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
