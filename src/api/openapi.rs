//! OpenAPI document for the REST and SSE endpoints.

use utoipa::OpenApi;

use super::dto::ItemPayload;
use super::handlers::{item, system};
use crate::domain::{Item, ItemId};
use crate::error::{ErrorBody, ErrorResponse};
use crate::stream::sse;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "inventory-gateway",
        description = "In-memory inventory with live change notifications"
    ),
    paths(
        item::list_items,
        item::get_item,
        item::create_item,
        item::update_item,
        item::delete_item,
        system::ping_handler,
        system::health_handler,
        sse::sse_handler,
    ),
    components(schemas(
        Item,
        ItemId,
        ItemPayload,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse
    )),
    tags(
        (name = "Items", description = "Inventory CRUD"),
        (name = "Events", description = "Live change stream"),
        (name = "System", description = "Liveness and health"),
    )
)]
pub struct ApiDoc;
