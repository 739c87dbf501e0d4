//! Streaming layer: live change notifications.
//!
//! A [`Session`] is the transport-independent core. `GET /events` serves
//! it as Server-Sent Events and `GET /ws` as a WebSocket.

pub mod session;
pub mod sse;
pub mod ws;

pub use session::{Session, SessionEnd};
