//! [`GroceryApi`] over the single `POST /api/v1/rpc` endpoint.

use async_trait::async_trait;
use grocery_core::item::{CreateGroceryItem, GroceryItem, UpdateGroceryItem};
use grocery_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{read_data, DeleteResult, GroceryApi, HealthStatus};
use crate::error::ClientError;

/// One RPC call as sent on the wire: `{"method": ..., "params": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
enum RpcCall<'a> {
    Healthcheck,
    CreateItem(&'a CreateGroceryItem),
    ListItems,
    UpdateItem(UpdateParams<'a>),
    SetPurchased(SetPurchasedParams),
    DeleteItem(IdParams),
}

#[derive(Debug, Serialize)]
struct UpdateParams<'a> {
    id: DbId,
    #[serde(flatten)]
    changes: &'a UpdateGroceryItem,
}

#[derive(Debug, Serialize)]
struct SetPurchasedParams {
    id: DbId,
    is_purchased: bool,
}

#[derive(Debug, Serialize)]
struct IdParams {
    id: DbId,
}

/// Client for the RPC endpoint. Errors use the same envelope as REST.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let endpoint = format!("{}/api/v1/rpc", base_url.into().trim_end_matches('/'));
        Self { http, endpoint }
    }

    pub async fn healthcheck(&self) -> Result<HealthStatus, ClientError> {
        self.call(&RpcCall::Healthcheck).await
    }

    async fn call<T: DeserializeOwned>(&self, call: &RpcCall<'_>) -> Result<T, ClientError> {
        tracing::debug!(?call, "RPC call");
        let response = self.http.post(&self.endpoint).json(call).send().await?;
        read_data(response).await
    }
}

#[async_trait]
impl GroceryApi for RpcClient {
    async fn list_items(&self) -> Result<Vec<GroceryItem>, ClientError> {
        self.call(&RpcCall::ListItems).await
    }

    async fn create_item(&self, input: &CreateGroceryItem) -> Result<GroceryItem, ClientError> {
        self.call(&RpcCall::CreateItem(input)).await
    }

    async fn update_item(
        &self,
        id: DbId,
        input: &UpdateGroceryItem,
    ) -> Result<GroceryItem, ClientError> {
        self.call(&RpcCall::UpdateItem(UpdateParams { id, changes: input }))
            .await
    }

    async fn set_purchased(
        &self,
        id: DbId,
        is_purchased: bool,
    ) -> Result<GroceryItem, ClientError> {
        self.call(&RpcCall::SetPurchased(SetPurchasedParams { id, is_purchased }))
            .await
    }

    async fn delete_item(&self, id: DbId) -> Result<bool, ClientError> {
        let result: DeleteResult = self.call(&RpcCall::DeleteItem(IdParams { id })).await?;
        Ok(result.success)
    }
}
