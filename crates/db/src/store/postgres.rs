use async_trait::async_trait;
use grocery_core::types::DbId;

use super::{ItemStore, StoreError};
use crate::models::grocery_item::{GroceryItem, GroceryItemChanges, NewGroceryItem};
use crate::repositories::GroceryItemRepo;
use crate::DbPool;

/// [`ItemStore`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgItemStore {
    pool: DbPool,
}

impl PgItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, input: &NewGroceryItem) -> Result<GroceryItem, StoreError> {
        Ok(GroceryItemRepo::create(&self.pool, input).await?)
    }

    async fn list(&self) -> Result<Vec<GroceryItem>, StoreError> {
        Ok(GroceryItemRepo::list(&self.pool).await?)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &GroceryItemChanges,
    ) -> Result<Option<GroceryItem>, StoreError> {
        Ok(GroceryItemRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(GroceryItemRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
