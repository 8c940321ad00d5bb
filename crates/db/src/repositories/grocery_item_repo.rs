//! Repository for the `grocery_items` table.

use grocery_core::types::DbId;
use sqlx::PgPool;

use crate::models::grocery_item::{GroceryItem, GroceryItemChanges, NewGroceryItem};

/// Column list for `grocery_items` queries.
const COLUMNS: &str = "id, name, category, is_purchased, created_at, updated_at";

/// Provides CRUD operations for grocery items.
pub struct GroceryItemRepo;

impl GroceryItemRepo {
    /// Insert a new item. `is_purchased` and both timestamps take their
    /// column defaults, so `created_at == updated_at`.
    pub async fn create(pool: &PgPool, input: &NewGroceryItem) -> Result<GroceryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO grocery_items (name, category) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroceryItem>(&query)
            .bind(&input.name)
            .bind(input.category.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all items in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<GroceryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grocery_items ORDER BY id");
        sqlx::query_as::<_, GroceryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GroceryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grocery_items WHERE id = $1");
        sqlx::query_as::<_, GroceryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an item.
    ///
    /// Uses `COALESCE` so only provided fields are changed. `updated_at` is
    /// refreshed even when every field is `None`. Returns `None` if no row
    /// has this ID.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &GroceryItemChanges,
    ) -> Result<Option<GroceryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE grocery_items SET \
                 name = COALESCE($2, name), \
                 category = COALESCE($3, category), \
                 is_purchased = COALESCE($4, is_purchased), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GroceryItem>(&query)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.category.map(|c| c.as_str()))
            .bind(changes.is_purchased)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grocery_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
