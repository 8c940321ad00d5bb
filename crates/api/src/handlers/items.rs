//! REST handlers for grocery items.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grocery_core::types::DbId;
use grocery_core::item::{CreateGroceryItem, SetPurchased, UpdateGroceryItem};

use super::{AppJson, AppPath};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/items
pub async fn create_item(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGroceryItem>,
) -> AppResult<impl IntoResponse> {
    let item = state.items.create(&input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/items
///
/// All items in insertion order; an empty list is not an error.
pub async fn list_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.items.list().await?;

    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/items/{id}
///
/// Partial update: only fields present in the body change.
pub async fn update_item(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateGroceryItem>,
) -> AppResult<impl IntoResponse> {
    let item = state.items.update(item_id, &input).await?;

    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/items/{id}/purchased
pub async fn set_purchased(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<DbId>,
    AppJson(input): AppJson<SetPurchased>,
) -> AppResult<impl IntoResponse> {
    let item = state.items.set_purchased(item_id, input.is_purchased).await?;

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/items/{id}
///
/// Returns `{ "data": { "success": true } }` even when the item was absent.
pub async fn delete_item(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = state.items.delete(item_id).await?;

    Ok(Json(DataResponse { data: result }))
}
