//! The [`ItemStore`] seam between the item service and persistence.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use grocery_core::types::DbId;

use crate::models::grocery_item::{GroceryItem, GroceryItemChanges, NewGroceryItem};

/// Failure of the underlying persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store was closed at shutdown and accepts no further operations.
    #[error("Store is closed")]
    Closed,
}

/// Persistence for grocery items.
///
/// Constructed once at startup, shared behind `Arc<dyn ItemStore>` and
/// closed explicitly at shutdown.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Insert an item with `is_purchased = false` and both timestamps set to
    /// the same instant.
    async fn create(&self, input: &NewGroceryItem) -> Result<GroceryItem, StoreError>;

    /// All items in insertion order.
    async fn list(&self) -> Result<Vec<GroceryItem>, StoreError>;

    /// Apply `changes` and refresh `updated_at`. `None` when the ID is absent.
    async fn update(
        &self,
        id: DbId,
        changes: &GroceryItemChanges,
    ) -> Result<Option<GroceryItem>, StoreError>;

    /// Remove the item. Returns whether a row existed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release the underlying resources. Idempotent.
    async fn close(&self);
}
