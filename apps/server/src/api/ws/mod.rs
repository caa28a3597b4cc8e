mod client;
mod events;
mod server;
mod state;

use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Router,
};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::time::Duration;

use crate::models::domain::TodoEvent;
use client::handle_client_messages;
use server::handle_server_messages;
use state::SocketState;

// Configuration constants
const PING_INTERVAL: Duration = Duration::from_secs(30);
const PONG_TIMEOUT: Duration = Duration::from_secs(60);

/// Path of the real-time hub
pub const HUB_PATH: &str = "/todoHub";

/// Create the real-time hub route
/// Generic over the state type so tests can mount it on any state that
/// exposes the event sender
pub fn create_ws<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static + WsState,
{
    Router::new().route(HUB_PATH, get(ws_handler::<S>))
}

/// WebSocket upgrade handler
async fn ws_handler<S>(ws: WebSocketUpgrade, State(state): State<S>) -> Response
where
    S: Clone + Send + Sync + 'static + WsState,
{
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Trait that AppState must implement to provide WebSocket functionality
pub trait WsState {
    fn event_tx(&self) -> &broadcast::Sender<TodoEvent>;
}

/// Handle a hub connection with ping/pong keepalive
async fn handle_socket<S>(socket: WebSocket, state: S)
where
    S: WsState,
{
    let (sender, receiver) = socket.split();
    let socket_state = Arc::new(RwLock::new(SocketState::new()));
    let event_rx = state.event_tx().subscribe();
    let (reply_tx, reply_rx) = tokio::sync::mpsc::unbounded_channel();

    log::info!(
        "Hub client connected ({} receiver(s))",
        state.event_tx().receiver_count()
    );

    // Task 1: Handle incoming messages from client
    let mut recv_task = {
        let socket_state = socket_state.clone();
        tokio::spawn(async move { handle_client_messages(receiver, socket_state, reply_tx).await })
    };

    // Task 2: Forward broadcast events to client + ping/pong management
    let mut send_task = {
        let socket_state = socket_state.clone();
        tokio::spawn(async move {
            handle_server_messages(sender, event_rx, socket_state, reply_rx).await
        })
    };

    // Whichever side ends first tears down the other
    tokio::select! {
        _ = &mut recv_task => {
            log::debug!("Hub receive task ended");
            send_task.abort();
        },
        _ = &mut send_task => {
            log::debug!("Hub send task ended");
            recv_task.abort();
        },
    }

    log::info!("Hub client disconnected");
}
