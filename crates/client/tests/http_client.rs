//! Drives `GroceryClient`, `RpcClient` and `ShoppingListView` against a
//! real API server bound to an ephemeral port, backed by the in-memory store.

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::HeaderValue;
use grocery_api::config::{CorsOrigins, ServerConfig};
use grocery_api::router::build_app_router;
use grocery_api::state::AppState;
use grocery_client::{ClientError, GroceryApi, GroceryClient, RpcClient, ShoppingListView};
use grocery_core::grocery::GroceryCategory;
use grocery_core::item::{CreateGroceryItem, UpdateGroceryItem};
use grocery_db::MemoryItemStore;

/// Start a server on `127.0.0.1:0` and return its base URL.
async fn spawn_server() -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:5173")]),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
    };
    let state = AppState::new(Arc::new(MemoryItemStore::new()));
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn create_input(name: &str, category: GroceryCategory) -> CreateGroceryItem {
    CreateGroceryItem {
        name: name.to_string(),
        category: category.to_string(),
    }
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let client = GroceryClient::new(spawn_server().await);

    let health = client.healthcheck().await.unwrap();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn crud_round_trip_over_http() {
    let client = GroceryClient::new(format!("{}/", spawn_server().await));

    assert!(client.list_items().await.unwrap().is_empty());

    let created = client
        .create_item(&create_input("Bananas", GroceryCategory::Produce))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert!(!created.is_purchased);
    assert_eq!(created.created_at, created.updated_at);

    let bought = client.set_purchased(created.id, true).await.unwrap();
    assert!(bought.is_purchased);
    assert!(bought.updated_at > created.created_at);

    let renamed = client
        .update_item(
            created.id,
            &UpdateGroceryItem {
                name: Some("Plantains".to_string()),
                ..UpdateGroceryItem::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Plantains");
    assert!(renamed.is_purchased);

    assert!(client.delete_item(created.id).await.unwrap());
    assert!(client.delete_item(created.id).await.unwrap());
    assert!(client.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn api_errors_carry_code_and_field() {
    let client = GroceryClient::new(spawn_server().await);

    let err = client
        .create_item(&CreateGroceryItem {
            name: "Gum".to_string(),
            category: "Candy".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(
        &err,
        ClientError::Api { status: 400, code, field: Some(field), .. }
            if code == "VALIDATION_ERROR" && field == "category"
    );

    let err = client.set_purchased(77, true).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn view_reconciles_with_server() {
    let base_url = spawn_server().await;
    let seed = GroceryClient::new(base_url.clone());
    seed.create_item(&create_input("Milk", GroceryCategory::Dairy))
        .await
        .unwrap();

    let mut view = ShoppingListView::new(GroceryClient::new(base_url));
    view.load().await.unwrap();
    assert_eq!(view.list().len(), 1);

    view.draft_mut().name = "Bread".to_string();
    view.draft_mut().category = GroceryCategory::Bakery;
    let bread = view.add().await.unwrap();

    view.toggle(bread).await.unwrap();
    assert_eq!(view.list().pending_count(), 1);
    assert_eq!(view.list().purchased_count(), 1);

    view.remove(1).await.unwrap();
    let names: Vec<_> = view.list().items().map(|i| i.name.clone()).collect();
    assert_eq!(names, ["Bread"]);

    // A fresh load agrees with the reconciled local state.
    let local: Vec<_> = view.list().items().cloned().collect();
    view.load().await.unwrap();
    let reloaded: Vec<_> = view.list().items().cloned().collect();
    assert_eq!(local, reloaded);
}

#[tokio::test]
async fn rpc_client_round_trip() {
    let client = RpcClient::new(spawn_server().await);

    assert_eq!(client.healthcheck().await.unwrap().status, "ok");
    assert!(client.list_items().await.unwrap().is_empty());

    let created = client
        .create_item(&create_input("Yogurt", GroceryCategory::Dairy))
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let renamed = client
        .update_item(
            created.id,
            &UpdateGroceryItem {
                name: Some("Greek yogurt".to_string()),
                ..UpdateGroceryItem::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Greek yogurt");
    assert_eq!(renamed.category, GroceryCategory::Dairy);

    let bought = client.set_purchased(created.id, true).await.unwrap();
    assert!(bought.is_purchased);

    let err = client.set_purchased(99, true).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(client.delete_item(created.id).await.unwrap());
    assert!(client.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn view_over_rpc_transport() {
    let mut view = ShoppingListView::new(RpcClient::new(spawn_server().await));
    view.load().await.unwrap();
    assert!(view.list().is_empty());

    view.draft_mut().name = "Sponges".to_string();
    view.draft_mut().category = GroceryCategory::Household;
    let id = view.add().await.unwrap();
    view.toggle(id).await.unwrap();

    assert_eq!(view.list().purchased_count(), 1);
    assert_eq!(view.list().get(id).unwrap().category, GroceryCategory::Household);
}
