//! HTTP layer: REST handlers, DTOs, streaming routes, and router
//! composition.
//!
//! Routes are mounted at the root, matching the paths existing clients
//! already use (`/items`, `/events`).

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;
use crate::stream::{sse, ws};

/// Builds the complete router with REST, streaming and system endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .route("/events", get(sse::sse_handler))
        .route("/ws", get(ws::ws_handler))
}
