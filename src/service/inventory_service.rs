//! Inventory service: applies item mutations and emits events.

use std::sync::Arc;

use crate::domain::{Event, Hub, Item, ItemDraft, ItemEvent, ItemId, Store};
use crate::error::InventoryError;

/// Orchestration layer for all item operations.
///
/// Owns references to the [`Store`] for state and the [`Hub`] for event
/// fan-out. Every mutation follows the same pattern: apply it under the
/// store lock, release the lock, encode the event, publish it.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<Store>,
    hub: Hub,
}

impl InventoryService {
    /// Creates a new `InventoryService`.
    #[must_use]
    pub fn new(store: Arc<Store>, hub: Hub) -> Self {
        Self { store, hub }
    }

    /// Returns a reference to the inner [`Store`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns a reference to the inner [`Hub`].
    #[must_use]
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Returns every item in insertion order.
    #[must_use]
    pub fn list_items(&self) -> Vec<Item> {
        self.store.list()
    }

    /// Returns a single item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the item does not exist.
    pub fn get_item(&self, id: ItemId) -> Result<Item, InventoryError> {
        self.store.get(id)
    }

    /// Creates an item and broadcasts a `create` event.
    pub fn create_item(&self, draft: ItemDraft) -> Item {
        let item = self.store.create(draft);
        tracing::info!(id = %item.id, name = %item.name, price = item.price, "item created");
        self.notify(&ItemEvent::Create { item: item.clone() });
        item
    }

    /// Replaces an item and broadcasts an `update` event.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the item does not exist.
    pub fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, InventoryError> {
        let item = self.store.update(id, draft)?;
        tracing::info!(%id, name = %item.name, price = item.price, "item updated");
        self.notify(&ItemEvent::Update { item: item.clone() });
        Ok(item)
    }

    /// Removes an item and broadcasts a `delete` event.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the item does not exist.
    pub fn delete_item(&self, id: ItemId) -> Result<(), InventoryError> {
        let removed = self.store.delete(id)?;
        tracing::info!(%id, name = %removed.name, "item deleted");
        self.notify(&ItemEvent::Delete { id });
        Ok(())
    }

    /// Encodes and publishes `event`. The mutation has already been
    /// applied, so an encoding failure is logged rather than returned.
    fn notify(&self, event: &ItemEvent) {
        match Event::encode(event) {
            Ok(encoded) => {
                let delivered = self.hub.publish(&encoded);
                tracing::debug!(
                    action = encoded.action().as_str(),
                    delivered,
                    "event published"
                );
            }
            Err(err) => {
                tracing::error!(%err, action = event.action().as_str(), "event not published");
            }
        }
    }
}
