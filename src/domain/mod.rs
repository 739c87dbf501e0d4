//! Domain layer: items, the item store, and the notification hub.
//!
//! The [`Store`] and the [`Hub`] never reference each other. The store
//! produces items; the service layer turns mutations into [`Event`]s and
//! hands them to the hub once the store lock is released.

pub mod event;
pub mod hub;
pub mod item;
pub mod store;

pub use event::{Event, EventAction, ItemEvent};
pub use hub::{Hub, SubscriberId, Subscription};
pub use item::{Item, ItemDraft, ItemId};
pub use store::Store;
