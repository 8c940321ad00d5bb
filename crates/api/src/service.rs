//! The grocery item service.
//!
//! Validates inputs, runs exactly one store operation per call, and maps
//! missing rows to [`CoreError::NotFound`]. Both the REST handlers and the
//! RPC endpoint go through this type.

use std::sync::Arc;

use grocery_core::error::CoreError;
use grocery_core::grocery::ENTITY_GROCERY_ITEM;
use grocery_core::types::DbId;
use grocery_core::item::{
    CreateGroceryItem, GroceryItem, GroceryItemChanges, UpdateGroceryItem,
};
use grocery_db::ItemStore;

use crate::error::{AppError, AppResult};
use crate::response::SuccessResponse;

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Create an item. The name is stored as sent; duplicates are allowed.
    pub async fn create(&self, input: &CreateGroceryItem) -> AppResult<GroceryItem> {
        let new_item = input.validate()?;
        let item = self.store.create(&new_item).await?;

        tracing::info!(
            item_id = item.id,
            name = %item.name,
            category = %item.category,
            "Grocery item created",
        );

        Ok(item)
    }

    /// All items in insertion order.
    pub async fn list(&self) -> AppResult<Vec<GroceryItem>> {
        Ok(self.store.list().await?)
    }

    /// Apply the fields present in `input`. `updated_at` is refreshed even
    /// when nothing changes.
    pub async fn update(&self, id: DbId, input: &UpdateGroceryItem) -> AppResult<GroceryItem> {
        let changes = input.validate()?;
        let item = self.apply(id, &changes).await?;

        tracing::info!(
            item_id = item.id,
            name = %item.name,
            category = %item.category,
            is_purchased = item.is_purchased,
            "Grocery item updated",
        );

        Ok(item)
    }

    pub async fn set_purchased(&self, id: DbId, is_purchased: bool) -> AppResult<GroceryItem> {
        let item = self
            .apply(id, &GroceryItemChanges::purchased(is_purchased))
            .await?;

        tracing::info!(item_id = item.id, is_purchased, "Grocery item purchase status set");

        Ok(item)
    }

    /// Delete an item. Succeeds whether or not the item existed.
    pub async fn delete(&self, id: DbId) -> AppResult<SuccessResponse> {
        let existed = self.store.delete(id).await?;

        if existed {
            tracing::info!(item_id = id, "Grocery item deleted");
        } else {
            tracing::debug!(item_id = id, "Delete of absent grocery item ignored");
        }

        Ok(SuccessResponse { success: true })
    }

    async fn apply(&self, id: DbId, changes: &GroceryItemChanges) -> AppResult<GroceryItem> {
        self.store.update(id, changes).await?.ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_GROCERY_ITEM,
            id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use grocery_core::grocery::GroceryCategory;
    use grocery_db::MemoryItemStore;

    use super::*;

    fn service() -> ItemService {
        ItemService::new(Arc::new(MemoryItemStore::new()))
    }

    fn create_input(name: &str, category: &str) -> CreateGroceryItem {
        CreateGroceryItem {
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn bananas_scenario() {
        let items = service();

        let created = items.create(&create_input("Bananas", "Produce")).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(!created.is_purchased);
        assert_eq!(created.created_at, created.updated_at);

        let bought = items.set_purchased(1, true).await.unwrap();
        assert_eq!(bought.id, 1);
        assert!(bought.is_purchased);
        assert!(bought.updated_at > bought.created_at);

        assert_eq!(items.delete(1).await.unwrap(), SuccessResponse { success: true });
        assert!(items.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_name_before_the_store() {
        let items = service();

        let err = items.create(&create_input("   ", "Dairy")).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation { field: "name", .. }));
        assert!(items.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let items = service();

        let err = items.create(&create_input("Gum", "Candy")).await.unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Validation {
                field: "category",
                ..
            })
        );
    }

    #[tokio::test]
    async fn duplicates_are_allowed() {
        let items = service();
        let a = items.create(&create_input("Milk", "Dairy")).await.unwrap();
        let b = items.create(&create_input("Milk", "Dairy")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(items.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_name_only_leaves_other_fields() {
        let items = service();
        let item = items.create(&create_input("Loaf", "Bakery")).await.unwrap();
        items.set_purchased(item.id, true).await.unwrap();

        let input = UpdateGroceryItem {
            name: Some("Sourdough".to_string()),
            ..UpdateGroceryItem::default()
        };
        let updated = items.update(item.id, &input).await.unwrap();

        assert_eq!(updated.name, "Sourdough");
        assert_eq!(updated.category, GroceryCategory::Bakery);
        assert!(updated.is_purchased);
        assert!(updated.updated_at > item.updated_at);
    }

    #[tokio::test]
    async fn update_validates_present_fields() {
        let items = service();
        let item = items.create(&create_input("Loaf", "Bakery")).await.unwrap();

        let input = UpdateGroceryItem {
            category: Some("Bread".to_string()),
            ..UpdateGroceryItem::default()
        };
        let err = items.update(item.id, &input).await.unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Validation {
                field: "category",
                ..
            })
        );
    }

    #[tokio::test]
    async fn purchase_toggle_round_trips() {
        let items = service();
        let item = items.create(&create_input("Ice cream", "Frozen")).await.unwrap();

        let on = items.set_purchased(item.id, true).await.unwrap();
        let off = items.set_purchased(item.id, false).await.unwrap();

        assert!(!off.is_purchased);
        assert!(on.updated_at > item.updated_at);
        assert!(off.updated_at > on.updated_at);
    }

    #[tokio::test]
    async fn missing_id_is_not_found_for_update_and_set_purchased() {
        let items = service();

        let err = items.set_purchased(99, true).await.unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::NotFound {
                entity: "GroceryItem",
                id: 99
            })
        );

        let err = items
            .update(99, &UpdateGroceryItem::default())
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_targets_one_item() {
        let items = service();
        let keep = items.create(&create_input("Rice", "Pantry")).await.unwrap();
        let gone = items.create(&create_input("Beans", "Pantry")).await.unwrap();

        assert!(items.delete(gone.id).await.unwrap().success);
        assert!(items.delete(gone.id).await.unwrap().success);
        assert!(items.delete(12345).await.unwrap().success);

        assert_eq!(items.list().await.unwrap(), vec![keep]);
    }
}
