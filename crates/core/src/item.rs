//! Grocery item model and DTOs.
//!
//! Shared by the store, the API and the client. The row mapping for sqlx
//! is derived only with the `sqlx` feature, so the client builds without a
//! database driver.
//!
//! Request DTOs carry the category as a raw label so that an unknown label
//! is reported as a validation error on the `category` field rather than
//! as a JSON shape error. [`CreateGroceryItem::validate`] and
//! [`UpdateGroceryItem::validate`] turn them into the typed forms the store
//! accepts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grocery::{parse_category, validate_item_name, GroceryCategory};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `grocery_items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GroceryItem {
    pub id: DbId,
    pub name: String,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub category: GroceryCategory,
    pub is_purchased: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a grocery item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroceryItem {
    pub name: String,
    pub category: String,
}

/// DTO for partially updating a grocery item. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroceryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_purchased: Option<bool>,
}

/// DTO for setting only the purchase flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetPurchased {
    pub is_purchased: bool,
}

// ---------------------------------------------------------------------------
// Validated forms (store inputs)
// ---------------------------------------------------------------------------

/// A validated create request: non-blank name, known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroceryItem {
    pub name: String,
    pub category: GroceryCategory,
}

/// A validated partial update. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryItemChanges {
    pub name: Option<String>,
    pub category: Option<GroceryCategory>,
    pub is_purchased: Option<bool>,
}

impl GroceryItemChanges {
    /// Changes that touch only the purchase flag.
    pub fn purchased(is_purchased: bool) -> Self {
        Self {
            is_purchased: Some(is_purchased),
            ..Self::default()
        }
    }

    /// Apply the present fields to `item`, leaving the rest untouched.
    ///
    /// Does not touch timestamps; the store owns those.
    pub fn apply_to(&self, item: &mut GroceryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(is_purchased) = self.is_purchased {
            item.is_purchased = is_purchased;
        }
    }
}

impl CreateGroceryItem {
    pub fn validate(&self) -> Result<NewGroceryItem, CoreError> {
        validate_item_name(&self.name)?;
        Ok(NewGroceryItem {
            name: self.name.clone(),
            category: parse_category(&self.category)?,
        })
    }
}

impl UpdateGroceryItem {
    /// Validate each present field with the same rules as create.
    pub fn validate(&self) -> Result<GroceryItemChanges, CoreError> {
        if let Some(name) = &self.name {
            validate_item_name(name)?;
        }
        Ok(GroceryItemChanges {
            name: self.name.clone(),
            category: self.category.as_deref().map(parse_category).transpose()?,
            is_purchased: self.is_purchased,
        })
    }
}
