//! Single typed RPC endpoint.
//!
//! Every item operation plus the health check is reachable through one
//! `POST /api/v1/rpc` route. The body names the operation and carries its
//! parameters:
//!
//! ```text
//! {"method": "createItem",   "params": {"name": "Milk", "category": "Dairy"}}
//! {"method": "listItems"}
//! {"method": "updateItem",   "params": {"id": 1, "name": "Oat milk"}}
//! {"method": "setPurchased", "params": {"id": 1, "is_purchased": true}}
//! {"method": "deleteItem",   "params": {"id": 1}}
//! {"method": "healthcheck"}
//! ```
//!
//! `listItems` and `healthcheck` take no input; their `params` may be
//! omitted, `null`, or `{}`.
//!
//! Unknown methods and mistyped parameters are rejected as `BAD_REQUEST`
//! before any operation runs.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use grocery_core::types::DbId;
use grocery_core::item::{CreateGroceryItem, GroceryItem, UpdateGroceryItem};
use serde::{Deserialize, Serialize};

use super::AppJson;
use crate::error::AppResult;
use crate::response::{DataResponse, SuccessResponse};
use crate::routes::health::{health_status, HealthResponse};
use crate::state::AppState;

/// An RPC call: operation name plus its parameters.
#[derive(Debug, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum RpcRequest {
    Healthcheck(Option<NoParams>),
    CreateItem(CreateGroceryItem),
    ListItems(Option<NoParams>),
    UpdateItem(UpdateItemParams),
    SetPurchased(SetPurchasedParams),
    DeleteItem(ItemIdParams),
}

/// Parameters of an operation that takes no input.
#[derive(Debug, Deserialize)]
pub struct NoParams {}

#[derive(Debug, Deserialize)]
pub struct UpdateItemParams {
    pub id: DbId,
    #[serde(flatten)]
    pub changes: UpdateGroceryItem,
}

#[derive(Debug, Deserialize)]
pub struct SetPurchasedParams {
    pub id: DbId,
    pub is_purchased: bool,
}

#[derive(Debug, Deserialize)]
pub struct ItemIdParams {
    pub id: DbId,
}

/// The result of an RPC call, serialized as the bare payload.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RpcResult {
    Health(HealthResponse),
    Item(GroceryItem),
    Items(Vec<GroceryItem>),
    Deleted(SuccessResponse),
}

/// POST /api/v1/rpc
pub async fn dispatch(
    State(state): State<AppState>,
    AppJson(request): AppJson<RpcRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(?request, "RPC call");

    let result = match request {
        RpcRequest::Healthcheck(_) => RpcResult::Health(health_status(&state).await),
        RpcRequest::CreateItem(input) => RpcResult::Item(state.items.create(&input).await?),
        RpcRequest::ListItems(_) => RpcResult::Items(state.items.list().await?),
        RpcRequest::UpdateItem(params) => {
            RpcResult::Item(state.items.update(params.id, &params.changes).await?)
        }
        RpcRequest::SetPurchased(params) => RpcResult::Item(
            state
                .items
                .set_purchased(params.id, params.is_purchased)
                .await?,
        ),
        RpcRequest::DeleteItem(params) => RpcResult::Deleted(state.items.delete(params.id).await?),
    };

    Ok(Json(DataResponse { data: result }))
}
