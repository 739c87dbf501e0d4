//! WebSocket transport.
//!
//! Carries the same JSON payloads as the SSE stream, one text frame per
//! event. Client frames are read only to notice a close.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt, future};

use super::session::Session;
use crate::app_state::AppState;
use crate::domain::Event;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_connection(socket, state))
}

/// Runs one session over an upgraded socket until either side closes.
async fn run_connection(socket: WebSocket, state: AppState) {
    let session = match Session::open(state.inventory.store(), state.inventory.hub()) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(%err, "ws session could not open");
            return;
        }
    };

    let (ws_tx, mut ws_rx) = socket.split();
    let sink = ws_tx.with(|event: Event| {
        future::ready(Ok::<_, axum::Error>(Message::text(String::from(
            event.payload(),
        ))))
    });
    let disconnect = async move {
        while let Some(msg) = ws_rx.next().await {
            match msg {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    };

    let end = session.run(sink, disconnect).await;
    tracing::debug!(?end, "ws connection closed");
}
