//! Change notifications and their wire encoding.
//!
//! Every successful mutation yields one [`ItemEvent`], which is encoded
//! exactly once into an immutable [`Event`]. The hub hands clones of that
//! `Event` to each subscriber, so the JSON text is shared rather than
//! re-serialized per connection.

use std::sync::Arc;

use serde::Serialize;

use super::item::{Item, ItemId};
use crate::error::InventoryError;

/// Kind of change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Full snapshot sent once when a stream opens.
    Init,
    /// An item was created.
    Create,
    /// An item was replaced.
    Update,
    /// An item was removed.
    Delete,
}

impl EventAction {
    /// Returns the action as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Structured change notification, prior to encoding.
///
/// Serializes as `{"action": "<kind>", ...}` with the variant fields
/// flattened alongside the tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ItemEvent {
    /// Snapshot of the whole collection.
    Init {
        /// Items in insertion order.
        items: Vec<Item>,
    },
    /// An item was created.
    Create {
        /// The created item.
        item: Item,
    },
    /// An item was replaced.
    Update {
        /// The item after the update.
        item: Item,
    },
    /// An item was removed.
    Delete {
        /// Identifier of the removed item.
        id: ItemId,
    },
}

impl ItemEvent {
    /// Returns the action kind of this event.
    #[must_use]
    pub const fn action(&self) -> EventAction {
        match self {
            Self::Init { .. } => EventAction::Init,
            Self::Create { .. } => EventAction::Create,
            Self::Update { .. } => EventAction::Update,
            Self::Delete { .. } => EventAction::Delete,
        }
    }
}

/// Immutable, already-serialized notification.
///
/// Cloning is cheap: the payload is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    action: EventAction,
    payload: Arc<str>,
}

impl Event {
    /// Serializes `event` into its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Internal`] if JSON encoding fails.
    pub fn encode(event: &ItemEvent) -> Result<Self, InventoryError> {
        let payload = serde_json::to_string(event)?;
        Ok(Self {
            action: event.action(),
            payload: Arc::from(payload),
        })
    }

    /// Returns the action kind.
    #[must_use]
    pub const fn action(&self) -> EventAction {
        self.action
    }

    /// Returns the JSON payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }
}
