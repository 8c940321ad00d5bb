//! Transport seam and the HTTP implementation.

use async_trait::async_trait;
use grocery_core::types::{DbId, Timestamp};
use grocery_core::item::{
    CreateGroceryItem, GroceryItem, SetPurchased, UpdateGroceryItem,
};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

/// The item operations a shopping-list view needs from the backend.
#[async_trait]
pub trait GroceryApi: Send + Sync {
    async fn list_items(&self) -> Result<Vec<GroceryItem>, ClientError>;

    async fn create_item(&self, input: &CreateGroceryItem) -> Result<GroceryItem, ClientError>;

    async fn update_item(
        &self,
        id: DbId,
        input: &UpdateGroceryItem,
    ) -> Result<GroceryItem, ClientError>;

    async fn set_purchased(&self, id: DbId, is_purchased: bool)
        -> Result<GroceryItem, ClientError>;

    /// Delete an item; the server reports success even if it was absent.
    async fn delete_item(&self, id: DbId) -> Result<bool, ClientError>;
}

/// Server health as reported by `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Timestamp,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
    #[serde(default)]
    field: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct DeleteResult {
    pub(crate) success: bool,
}

/// HTTP client for the REST endpoints under `/api/v1`.
#[derive(Debug, Clone)]
pub struct GroceryClient {
    http: reqwest::Client,
    base_url: String,
}

impl GroceryClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub async fn healthcheck(&self) -> Result<HealthStatus, ClientError> {
        let response = self.http.get(format!("{}/health", self.base_url)).send().await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    fn items_url(&self) -> String {
        format!("{}/api/v1/items", self.base_url)
    }

    fn item_url(&self, id: DbId) -> String {
        format!("{}/api/v1/items/{id}", self.base_url)
    }
}

/// Turn a non-success response into [`ClientError::Api`].
pub(crate) async fn error_for_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let error = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.error,
            field: body.field,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: status
                .canonical_reason()
                .unwrap_or("UNKNOWN")
                .to_uppercase()
                .replace(' ', "_"),
            message: text,
            field: None,
        },
    };
    Err(error)
}

/// Unwrap a `{ "data": T }` success envelope.
pub(crate) async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = error_for_status(response).await?;
    let envelope: Envelope<T> = response.json().await?;
    Ok(envelope.data)
}

#[async_trait]
impl GroceryApi for GroceryClient {
    async fn list_items(&self) -> Result<Vec<GroceryItem>, ClientError> {
        let response = self.http.get(self.items_url()).send().await?;
        read_data(response).await
    }

    async fn create_item(&self, input: &CreateGroceryItem) -> Result<GroceryItem, ClientError> {
        let response = self.http.post(self.items_url()).json(input).send().await?;
        read_data(response).await
    }

    async fn update_item(
        &self,
        id: DbId,
        input: &UpdateGroceryItem,
    ) -> Result<GroceryItem, ClientError> {
        let response = self.http.put(self.item_url(id)).json(input).send().await?;
        read_data(response).await
    }

    async fn set_purchased(
        &self,
        id: DbId,
        is_purchased: bool,
    ) -> Result<GroceryItem, ClientError> {
        let response = self
            .http
            .put(format!("{}/purchased", self.item_url(id)))
            .json(&SetPurchased { is_purchased })
            .send()
            .await?;
        read_data(response).await
    }

    async fn delete_item(&self, id: DbId) -> Result<bool, ClientError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        let result: DeleteResult = read_data(response).await?;
        Ok(result.success)
    }
}
