//! Client for the grocery list API.
//!
//! [`GroceryClient`] speaks the REST surface over HTTP and [`RpcClient`]
//! the single RPC endpoint. [`ShoppingListView`] holds the client-side item
//! collection and keeps it reconciled with the server's responses; it is
//! generic over [`GroceryApi`] so either transport can drive it.

pub mod api;
pub mod error;
pub mod rpc;
pub mod view;

pub use api::{GroceryApi, GroceryClient, HealthStatus};
pub use error::ClientError;
pub use rpc::RpcClient;
pub use view::{ItemDraft, ShoppingList, ShoppingListView};
