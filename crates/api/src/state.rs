use std::sync::Arc;

use grocery_db::ItemStore;

use crate::service::ItemService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Grocery item operations over the configured store.
    pub items: ItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            items: ItemService::new(store),
        }
    }
}
