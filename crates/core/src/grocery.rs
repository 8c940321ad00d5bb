//! Grocery item categories and input validation.
//!
//! Categories form a closed set; free-text categories are rejected at the
//! boundary by [`parse_category`] and can never reach the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Entity name used in `NotFound` errors.
pub const ENTITY_GROCERY_ITEM: &str = "GroceryItem";

/// Input field name: item name.
pub const FIELD_NAME: &str = "name";

/// Input field name: item category.
pub const FIELD_CATEGORY: &str = "category";

/* --------------------------------------------------------------------------
Category
-------------------------------------------------------------------------- */

/// Classification label for a grocery item.
///
/// Serialized with the exact labels below, both on the wire and in the
/// `grocery_items.category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GroceryCategory {
    #[default]
    Produce,
    Dairy,
    Bakery,
    Meat,
    Pantry,
    Frozen,
    Household,
}

impl GroceryCategory {
    /// All categories in display order.
    pub const ALL: [GroceryCategory; 7] = [
        GroceryCategory::Produce,
        GroceryCategory::Dairy,
        GroceryCategory::Bakery,
        GroceryCategory::Meat,
        GroceryCategory::Pantry,
        GroceryCategory::Frozen,
        GroceryCategory::Household,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::Bakery => "Bakery",
            GroceryCategory::Meat => "Meat",
            GroceryCategory::Pantry => "Pantry",
            GroceryCategory::Frozen => "Frozen",
            GroceryCategory::Household => "Household",
        }
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroceryCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroceryCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = GroceryCategory::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::validation(
                    FIELD_CATEGORY,
                    format!("Unknown category: '{s}'. Valid categories: {}", valid.join(", ")),
                )
            })
    }
}

/// Used by sqlx to decode the `TEXT` category column.
impl TryFrom<String> for GroceryCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate an item name.
///
/// Empty and whitespace-only names are rejected. Accepted names are stored
/// as sent, surrounding whitespace included.
pub fn validate_item_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation(FIELD_NAME, "Item name is required"));
    }
    Ok(())
}

/// Parse a category label, rejecting anything outside the closed set.
///
/// Matching is exact: `"produce"` is not `"Produce"`.
pub fn parse_category(label: &str) -> Result<GroceryCategory, CoreError> {
    label.parse()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
