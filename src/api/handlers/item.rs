//! Item CRUD handlers: list, get, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ItemPayload;
use crate::app_state::AppState;
use crate::domain::{Item, ItemDraft, ItemId};
use crate::error::{ErrorResponse, InventoryError};

/// `GET /items` — List every item in insertion order.
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    summary = "List items",
    description = "Returns every item in the order it was created.",
    responses(
        (status = 200, description = "All items", body = Vec<Item>),
    )
)]
pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.inventory.list_items())
}

/// `GET /items/{id}` — Get a single item.
///
/// # Errors
///
/// Returns [`InventoryError::NotFound`] if the item does not exist, or
/// [`InventoryError::InvalidInput`] if the id is not a number.
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    summary = "Get item",
    params(
        ("id" = u64, Path, description = "Item identifier"),
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let id = parse_id(path)?;
    Ok(Json(state.inventory.get_item(id)?))
}

/// `POST /items` — Create an item.
///
/// # Errors
///
/// Returns [`InventoryError::InvalidInput`] if the body is malformed or
/// fails validation.
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    summary = "Create item",
    description = "Creates an item and broadcasts a `create` event. Any `id` in the body is ignored.",
    request_body = ItemPayload,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let draft = parse_payload(body)?;
    let item = state.inventory.create_item(draft);
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /items/{id}` — Replace an item's name and price.
///
/// # Errors
///
/// Returns [`InventoryError::NotFound`] if the item does not exist, or
/// [`InventoryError::InvalidInput`] if the id or body is malformed.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    summary = "Update item",
    description = "Replaces name and price and broadcasts an `update` event. The path identifier is authoritative; any `id` in the body is ignored.",
    params(
        ("id" = u64, Path, description = "Item identifier"),
    ),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let id = parse_id(path)?;
    let draft = parse_payload(body)?;
    Ok(Json(state.inventory.update_item(id, draft)?))
}

/// `DELETE /items/{id}` — Remove an item.
///
/// # Errors
///
/// Returns [`InventoryError::NotFound`] if the item does not exist.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    summary = "Delete item",
    description = "Removes an item and broadcasts a `delete` event.",
    params(
        ("id" = u64, Path, description = "Item identifier"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse, InventoryError> {
    let id = parse_id(path)?;
    state.inventory.delete_item(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

fn parse_id(path: Result<Path<u64>, PathRejection>) -> Result<ItemId, InventoryError> {
    let Path(raw) = path.map_err(|rejection| InventoryError::InvalidInput(rejection.body_text()))?;
    Ok(ItemId::new(raw))
}

fn parse_payload(
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<ItemDraft, InventoryError> {
    let Json(payload) =
        body.map_err(|rejection| InventoryError::InvalidInput(rejection.body_text()))?;
    ItemDraft::try_from(payload)
}
