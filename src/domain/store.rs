//! Authoritative in-memory item collection.
//!
//! [`Store`] owns the ordered item list and the identifier allocator behind
//! a single [`parking_lot::Mutex`]. Readers and writers are serialized
//! alike; at the expected load a reader/writer split buys nothing.
//! No I/O and no subscriber interaction happens while the lock is held.

use parking_lot::Mutex;

use super::item::{Item, ItemDraft, ItemId};
use crate::error::InventoryError;

/// Collection state guarded by the store lock.
#[derive(Debug)]
struct Inventory {
    /// Items in insertion order.
    items: Vec<Item>,
    /// Next identifier to hand out. Always greater than every identifier
    /// ever assigned.
    next_id: u64,
}

/// Central store for all inventory items.
///
/// # Concurrency
///
/// Every operation takes the same exclusive lock, so each one observes
/// the collection in a state produced by a complete sequence of earlier
/// operations. Identifier allocation and insertion happen under one lock
/// acquisition.
#[derive(Debug)]
pub struct Store {
    inventory: Mutex<Inventory>,
}

impl Store {
    /// Creates an empty store whose first identifier is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inventory: Mutex::new(Inventory {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store pre-populated with `items`, kept in the given order.
    ///
    /// The allocator starts one past the largest seeded identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidInput`] if two seeded items share
    /// an identifier, or if an item already uses `u64::MAX` and no
    /// identifier would be left to allocate.
    pub fn with_items(items: Vec<Item>) -> Result<Self, InventoryError> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(InventoryError::InvalidInput(format!(
                    "duplicate seed item id {}",
                    item.id
                )));
            }
        }
        let next_id = match items.iter().map(|item| item.id.get()).max() {
            None => 1,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                InventoryError::InvalidInput(format!("seed item id {max} leaves no id to allocate"))
            })?,
        };
        Ok(Self {
            inventory: Mutex::new(Inventory { items, next_id }),
        })
    }

    /// Creates a store holding the two demo items the service ships with.
    ///
    /// # Errors
    ///
    /// Propagates [`Store::with_items`] errors; the demo seed itself is
    /// valid.
    pub fn with_demo_items() -> Result<Self, InventoryError> {
        Self::with_items(vec![
            Item {
                id: ItemId::new(1),
                name: "Lapicera".to_string(),
                price: 10,
            },
            Item {
                id: ItemId::new(2),
                name: "Cuaderno".to_string(),
                price: 50,
            },
        ])
    }

    /// Returns a snapshot of every item in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.inventory.lock().items.clone()
    }

    /// Returns the item carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if no item carries `id`.
    pub fn get(&self, id: ItemId) -> Result<Item, InventoryError> {
        let inventory = self.inventory.lock();
        inventory
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(InventoryError::NotFound(id))
    }

    /// Allocates the next identifier and appends a new item.
    #[must_use]
    pub fn create(&self, draft: ItemDraft) -> Item {
        let mut inventory = self.inventory.lock();
        let id = ItemId::new(inventory.next_id);
        inventory.next_id += 1;
        let item = draft.into_item(id);
        inventory.items.push(item.clone());
        item
    }

    /// Replaces name and price of the item carrying `id`, keeping its
    /// identity and position.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if no item carries `id`.
    pub fn update(&self, id: ItemId, draft: ItemDraft) -> Result<Item, InventoryError> {
        let mut inventory = self.inventory.lock();
        let slot = inventory
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        *slot = draft.into_item(id);
        Ok(slot.clone())
    }

    /// Removes the item carrying `id`, preserving the order of the rest.
    ///
    /// Returns the removed item.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if no item carries `id`.
    pub fn delete(&self, id: ItemId) -> Result<Item, InventoryError> {
        let mut inventory = self.inventory.lock();
        let index = inventory
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        Ok(inventory.items.remove(index))
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inventory.lock().items.len()
    }

    /// Returns `true` if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inventory.lock().items.is_empty()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
