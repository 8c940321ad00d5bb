//! Client-side shopping list state.
//!
//! [`ShoppingList`] is the local item collection, ordered and keyed by id.
//! The pending and purchased partitions are projections computed on every
//! read, never stored. [`ShoppingListView`] drives the collection from
//! server calls: local state only changes after a call succeeds. Every
//! call takes `&mut self`, so a view never has two calls in flight.

use std::fmt;

use grocery_core::grocery::GroceryCategory;
use grocery_core::types::DbId;
use grocery_core::item::{CreateGroceryItem, GroceryItem};
use indexmap::IndexMap;

use crate::api::GroceryApi;
use crate::error::ClientError;

/// Ordered, id-keyed collection of the items the client has loaded.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: IndexMap<DbId, GroceryItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection, keeping the server's order.
    pub fn replace_all(&mut self, items: Vec<GroceryItem>) {
        self.items = items.into_iter().map(|item| (item.id, item)).collect();
    }

    /// Append a newly created item. An item whose id is already present is
    /// replaced in place instead.
    pub fn append(&mut self, item: GroceryItem) {
        self.items.insert(item.id, item);
    }

    /// Replace the item with the same id, keeping its position. Returns
    /// `false` when no such item is held.
    pub fn replace(&mut self, item: GroceryItem) -> bool {
        match self.items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove an item, preserving the order of the rest.
    pub fn remove(&mut self, id: DbId) -> Option<GroceryItem> {
        self.items.shift_remove(&id)
    }

    pub fn get(&self, id: DbId) -> Option<&GroceryItem> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &GroceryItem> {
        self.items.values()
    }

    /// Items still to buy, in list order.
    pub fn pending(&self) -> impl Iterator<Item = &GroceryItem> {
        self.items().filter(|item| !item.is_purchased)
    }

    /// Items already bought, in list order.
    pub fn purchased(&self) -> impl Iterator<Item = &GroceryItem> {
        self.items().filter(|item| item.is_purchased)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn purchased_count(&self) -> usize {
        self.purchased().count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Plain-text rendering: counts, then the pending and purchased sections.
/// Empty sections are omitted.
impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            writeln!(f, "Your list is empty!")?;
            return writeln!(f, "Add your first grocery item to get started");
        }

        writeln!(
            f,
            "To Buy: {}  Completed: {}",
            self.pending_count(),
            self.purchased_count()
        )?;

        let pending = self.pending_count();
        if pending > 0 {
            writeln!(f)?;
            writeln!(f, "Shopping List ({pending})")?;
            for item in self.pending() {
                writeln!(f, "[ ] {} ({})", item.name, item.category)?;
            }
        }

        let purchased = self.purchased_count();
        if purchased > 0 {
            writeln!(f)?;
            writeln!(f, "Completed ({purchased})")?;
            for item in self.purchased() {
                writeln!(f, "[x] {} ({})", item.name, item.category)?;
            }
        }

        Ok(())
    }
}

/// The add-item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category: GroceryCategory,
}

/// Shopping list bound to a backend.
pub struct ShoppingListView<A> {
    api: A,
    list: ShoppingList,
    draft: ItemDraft,
}

impl<A: GroceryApi> ShoppingListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: ShoppingList::new(),
            draft: ItemDraft::default(),
        }
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ItemDraft {
        &mut self.draft
    }

    /// Whether the draft can be submitted.
    pub fn can_add(&self) -> bool {
        !self.draft.name.trim().is_empty()
    }

    /// Fetch the full list and replace the local collection with it.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.list_items().await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Loaded grocery items");
                self.list.replace_all(items);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load grocery items");
                Err(e)
            }
        }
    }

    /// Submit the draft. On success the new item is appended, the draft is
    /// reset, and the new id is returned.
    pub async fn add(&mut self) -> Result<DbId, ClientError> {
        if self.draft.name.trim().is_empty() {
            return Err(ClientError::EmptyName);
        }

        let input = CreateGroceryItem {
            name: self.draft.name.clone(),
            category: self.draft.category.to_string(),
        };

        match self.api.create_item(&input).await {
            Ok(item) => {
                let id = item.id;
                self.list.append(item);
                self.draft = ItemDraft::default();
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create grocery item");
                Err(e)
            }
        }
    }

    /// Flip an item's purchase flag and replace it with the server's record.
    pub async fn toggle(&mut self, id: DbId) -> Result<(), ClientError> {
        let current = self
            .list
            .get(id)
            .map(|item| item.is_purchased)
            .ok_or(ClientError::UnknownItem(id))?;

        match self.api.set_purchased(id, !current).await {
            Ok(item) => {
                self.list.replace(item);
                Ok(())
            }
            Err(e) => {
                tracing::error!(item_id = id, error = %e, "Failed to update item");
                Err(e)
            }
        }
    }

    /// Delete an item on the server, then drop it locally.
    pub async fn remove(&mut self, id: DbId) -> Result<(), ClientError> {
        match self.api.delete_item(id).await {
            Ok(_) => {
                self.list.remove(id);
                Ok(())
            }
            Err(e) => {
                tracing::error!(item_id = id, error = %e, "Failed to delete item");
                Err(e)
            }
        }
    }
}
