//! Inventory items and their identifiers.
//!
//! [`ItemId`] is a newtype around `u64` so that item identifiers cannot be
//! confused with prices or subscriber ids. [`ItemDraft`] is the validated
//! name/price pair accepted by create and update.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::InventoryError;

/// Unique identifier for an inventory item.
///
/// Assigned by the [`super::Store`] at creation time and never reused
/// within a process lifetime, not even after the item is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, priced inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: i64,
}

/// Validated field values for a create or update.
///
/// Carries everything an [`Item`] has except its identity, which only the
/// store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    name: String,
    price: i64,
}

impl ItemDraft {
    /// Validates and builds a draft.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if `name` is blank or
    /// `price` is negative.
    pub fn new(name: impl Into<String>, price: i64) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::InvalidInput(
                "name must not be empty".to_string(),
            ));
        }
        if price < 0 {
            return Err(InventoryError::InvalidInput(format!(
                "price must not be negative, got {price}"
            )));
        }
        Ok(Self { name, price })
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item price.
    #[must_use]
    pub const fn price(&self) -> i64 {
        self.price
    }

    /// Builds the item this draft describes under the given identity.
    #[must_use]
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
        }
    }
}
