//! Item DTOs for create and update requests.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ItemDraft;
use crate::error::InventoryError;

/// Request body for `POST /items` and `PUT /items/{id}`.
///
/// An `id` field, if present, is ignored: the store assigns identifiers on
/// create and the path identifier wins on update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ItemPayload {
    /// Display name, must not be blank.
    pub name: String,
    /// Price in the smallest currency unit, must not be negative.
    pub price: i64,
}

impl TryFrom<ItemPayload> for ItemDraft {
    type Error = InventoryError;

    fn try_from(payload: ItemPayload) -> Result<Self, Self::Error> {
        Self::new(payload.name, payload.price)
    }
}
