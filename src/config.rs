//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::hub::DEFAULT_SUBSCRIBER_BUFFER;

/// Top-level service configuration.
///
/// Loaded once at startup via [`InventoryConfig::from_env`].
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Events each subscriber may have queued before it is evicted. The
    /// hub treats zero as one.
    pub subscriber_buffer: usize,

    /// Interval between SSE keep-alive comments.
    pub sse_keep_alive: Duration,

    /// Whether to start with the two demo items.
    pub seed_demo_items: bool,
}

impl InventoryConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let subscriber_buffer = parse_env("SUBSCRIBER_BUFFER", DEFAULT_SUBSCRIBER_BUFFER);
        let sse_keep_alive = Duration::from_secs(parse_env("SSE_KEEP_ALIVE_SECS", 15));
        let seed_demo_items = parse_env_bool("SEED_DEMO_ITEMS", true);

        Ok(Self {
            listen_addr,
            subscriber_buffer,
            sse_keep_alive,
            seed_demo_items,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
