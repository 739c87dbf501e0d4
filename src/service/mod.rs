//! Service layer: business logic orchestration.
//!
//! [`InventoryService`] applies item operations to the
//! [`super::domain::Store`] and emits events through the
//! [`super::domain::Hub`].

pub mod inventory_service;

pub use inventory_service::InventoryService;
