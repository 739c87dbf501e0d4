//! # inventory-gateway
//!
//! In-memory inventory service exposing CRUD over HTTP and broadcasting
//! every change to connected clients over Server-Sent Events or
//! WebSocket.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, SSE, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Stream Sessions (stream/)
//!     │
//!     ├── InventoryService (service/)
//!     │
//!     ├── Store (domain/)   items + id allocator, own lock
//!     └── Hub (domain/)     subscriber channels, own lock
//! ```
//!
//! A mutation takes the store lock, applies the change, releases the lock
//! and only then publishes the resulting event, so the two locks are never
//! held together.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod stream;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the fully layered application router.
pub fn app(state: AppState) -> Router {
    let router = api::build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    router
}
