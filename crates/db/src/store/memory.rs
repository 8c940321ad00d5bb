//! In-process [`ItemStore`] with the same semantics as the PostgreSQL
//! table: sequential IDs starting at 1, insertion-ordered listing, and
//! `updated_at` strictly increasing on every update.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use grocery_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{ItemStore, StoreError};
use crate::models::grocery_item::{GroceryItem, GroceryItemChanges, NewGroceryItem};

#[derive(Default)]
struct MemoryState {
    last_id: DbId,
    items: BTreeMap<DbId, GroceryItem>,
    closed: bool,
}

impl MemoryState {
    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

/// [`ItemStore`] holding items in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryItemStore {
    state: RwLock<MemoryState>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Current time, nudged past `previous` so successive writes to one row
/// never share a timestamp.
fn next_timestamp(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, input: &NewGroceryItem) -> Result<GroceryItem, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        state.last_id += 1;
        let now = Utc::now();
        let item = GroceryItem {
            id: state.last_id,
            name: input.name.clone(),
            category: input.category,
            is_purchased: false,
            created_at: now,
            updated_at: now,
        };
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<GroceryItem>, StoreError> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state.items.values().cloned().collect())
    }

    async fn update(
        &self,
        id: DbId,
        changes: &GroceryItemChanges,
    ) -> Result<Option<GroceryItem>, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        let Some(item) = state.items.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(item);
        item.updated_at = next_timestamp(item.updated_at);
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;
        Ok(state.items.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.state.read().await.ensure_open()
    }

    async fn close(&self) {
        let mut state = self.state.write().await;
        state.closed = true;
        tracing::info!(items = state.items.len(), "In-memory store closed");
    }
}
