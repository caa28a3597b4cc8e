//! Hub server message handling - sends messages to clients

use axum::{
    body::Bytes,
    extract::ws::{Message, WebSocket},
};
use futures::SinkExt;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::RwLock;
use tokio::time::interval;

use crate::models::api::ServerMessage;
use crate::models::domain::TodoEvent;

use super::{SocketState, PING_INTERVAL, PONG_TIMEOUT};

/// Forward every broadcast event to the client and manage ping/pong
pub(super) async fn handle_server_messages(
    mut sender: futures::stream::SplitSink<WebSocket, Message>,
    mut event_rx: broadcast::Receiver<TodoEvent>,
    socket_state: Arc<RwLock<SocketState>>,
    mut reply_rx: tokio::sync::mpsc::UnboundedReceiver<ServerMessage>,
) {
    let mut ping_interval = interval(PING_INTERVAL);

    loop {
        tokio::select! {
            // Send ping and check for dead connection
            _ = ping_interval.tick() => {
                let elapsed = socket_state.read().await.last_pong.elapsed();
                if elapsed > PONG_TIMEOUT {
                    log::warn!("No pong received for {:?}, disconnecting client", elapsed);
                    break;
                }

                if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                    log::error!("Failed to send ping, client disconnected");
                    break;
                }
                log::debug!("Sent ping to client");
            }

            // Replies to application-level messages
            Some(reply) = reply_rx.recv() => {
                if send_json(&mut sender, &reply).await.is_err() {
                    log::error!("Failed to send reply to client");
                    break;
                }
            }

            // Forward todo events to client
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        let server_msg = ServerMessage::from(event);
                        if send_json(&mut sender, &server_msg).await.is_err() {
                            log::error!("Failed to send message to client");
                            break;
                        }
                        socket_state.write().await.events_sent += 1;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("Hub client lagged, {} event(s) skipped", skipped);
                    }
                    Err(RecvError::Closed) => {
                        log::info!("Broadcast channel closed");
                        break;
                    }
                }
            }
        }
    }

    log::debug!(
        "Hub send loop finished after {} event(s)",
        socket_state.read().await.events_sent
    );
}

async fn send_json(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            log::error!("Failed to serialize {:?}: {}", msg, e);
            Ok(())
        }
    }
}
