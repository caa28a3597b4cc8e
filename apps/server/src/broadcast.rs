//! Fan-out of todo change events to every connected hub client

use tokio::sync::broadcast;

use crate::models::domain::TodoEvent;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Publishing side of the broadcast channel
///
/// Each hub connection holds its own receiver obtained from `subscribe()`.
/// Events are not stored: a client that is not connected at publish time
/// never sees the event.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<TodoEvent>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event, returning how many receivers it was queued for
    pub fn publish(&self, event: TodoEvent) -> usize {
        let name = event.name();
        let id = event.item_id();
        match self.tx.send(event) {
            Ok(receivers) => {
                log::debug!("Broadcast {} for {} to {} receiver(s)", name, id, receivers);
                receivers
            }
            // No hub connections; nothing to deliver
            Err(_) => {
                log::debug!("Broadcast {} for {} dropped, no receivers", name, id);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TodoEvent> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn sender(&self) -> &broadcast::Sender<TodoEvent> {
        &self.tx
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
