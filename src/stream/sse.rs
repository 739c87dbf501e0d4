//! Server-Sent Events transport.
//!
//! Each event is written as one `data: <json>` frame. Axum drops the
//! response stream when the client goes away, which releases the
//! session's subscription.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures_util::{Stream, StreamExt};

use super::session::Session;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, InventoryError};

/// `GET /events` — Open an SSE stream of inventory changes.
///
/// # Errors
///
/// Returns [`InventoryError::Internal`] if the initial snapshot cannot be
/// encoded.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    summary = "Stream inventory changes",
    description = "Server-Sent Events stream. The first frame is an `init` snapshot of every item; each later frame is a `create`, `update` or `delete` event.",
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = String),
        (status = 500, description = "Snapshot encoding failed", body = ErrorResponse),
    )
)]
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, InventoryError> {
    let session = Session::open(state.inventory.store(), state.inventory.hub())?;
    let frames = session
        .into_stream()
        .map(|event| Ok(SseEvent::default().data(event.payload())));
    Ok(Sse::new(frames).keep_alive(KeepAlive::new().interval(state.sse_keep_alive)))
}
