pub mod health;
pub mod items;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /items                     list, create
/// /items/{id}                update, delete
/// /items/{id}/purchased      set purchase status
///
/// /rpc                       single typed endpoint for every operation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        .route("/rpc", post(handlers::rpc::dispatch))
}
