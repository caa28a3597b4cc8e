//! Hub connection state

use tokio::time::Instant;

/// Shared state for a hub connection
pub(crate) struct SocketState {
    pub(crate) last_pong: Instant,
    pub(crate) events_sent: u64,
}

impl SocketState {
    pub(crate) fn new() -> Self {
        Self {
            last_pong: Instant::now(),
            events_sent: 0,
        }
    }
}
