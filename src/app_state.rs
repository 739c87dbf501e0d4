//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::service::InventoryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Inventory service for all business logic.
    pub inventory: Arc<InventoryService>,
    /// Interval between SSE keep-alive comments.
    pub sse_keep_alive: Duration,
}
