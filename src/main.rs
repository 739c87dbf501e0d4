//! inventory-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST, SSE and WebSocket endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use inventory_gateway::app_state::AppState;
use inventory_gateway::config::InventoryConfig;
use inventory_gateway::domain::{Hub, Store};
use inventory_gateway::service::InventoryService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = InventoryConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        subscriber_buffer = config.subscriber_buffer,
        "starting inventory-gateway"
    );

    // Build domain layer
    let store = if config.seed_demo_items {
        Store::with_demo_items()?
    } else {
        Store::new()
    };
    let hub = Hub::new(config.subscriber_buffer);

    // Build service layer
    let inventory = Arc::new(InventoryService::new(Arc::new(store), hub));

    // Build application state
    let app_state = AppState {
        inventory,
        sse_keep_alive: config.sse_keep_alive,
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, inventory_gateway::app(app_state)).await?;

    Ok(())
}
