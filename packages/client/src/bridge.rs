//! Remote-event bridge
//!
//! Turns hub messages into the same [`TodoAction`]s the local UI dispatches,
//! so changes made by other clients show up in this client's [`Store`].
//! There is no de-duplication: a client that mutates through REST will see
//! its own change echoed back by the hub and apply it a second time. Every
//! transition is keyed by id, so applying it again leaves the state as is.

use std::sync::Arc;
use todo_server::models::api::ServerMessage;

use crate::client::TodoClient;
use crate::error::ClientResult;
use crate::logger::Logger;
use crate::state::{Store, TodoAction};
use crate::websocket::WebSocketHandle;

/// Map a hub message to the client action it stands for
pub fn action_for(msg: &ServerMessage) -> Option<TodoAction> {
    match msg {
        ServerMessage::ItemCreated { item } => Some(TodoAction::Add(item.clone())),
        ServerMessage::ItemUpdated { item } => Some(TodoAction::Update(item.clone())),
        ServerMessage::ItemDeleted { id } => Some(TodoAction::Delete(*id)),
        ServerMessage::ItemCompleted { item } => Some(TodoAction::Complete(item.clone())),
        ServerMessage::ItemReset { item } => Some(TodoAction::Reset(item.clone())),
        ServerMessage::Pong => None,
    }
}

#[derive(Clone)]
pub struct Bridge {
    store: Store,
    logger: Arc<dyn Logger>,
}

impl Bridge {
    pub fn new(store: Store, logger: Arc<dyn Logger>) -> Self {
        Self { store, logger }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Load the full list from the server and dispatch `init`
    pub async fn sync(&self, client: &TodoClient) -> ClientResult<usize> {
        let todos = client.list_todos().await?;
        let count = todos.len();
        self.store.dispatch(TodoAction::Init(todos));
        self.logger.info(&format!("Synced {} todo(s)", count));
        Ok(count)
    }

    /// Dispatch the action for one hub message. Returns whether the message
    /// mapped to an action.
    pub fn apply(&self, msg: &ServerMessage) -> bool {
        match action_for(msg) {
            Some(action) => {
                self.logger.debug(&format!("Remote {}", action.name()));
                self.store.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Apply hub messages until the connection is gone for good
    pub async fn run(&self, handle: &mut WebSocketHandle) -> u64 {
        let mut applied = 0;
        while let Some(msg) = handle.recv().await {
            if self.apply(&msg) {
                applied += 1;
            }
        }
        self.logger
            .info(&format!("Hub stream ended after {} event(s)", applied));
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopLogger;
    use crate::state::TodoState;
    use todo_server::models::domain::TodoItem;

    fn bridge_with(todos: Vec<TodoItem>) -> Bridge {
        let logger: Arc<dyn Logger> = Arc::new(NoopLogger);
        Bridge::new(Store::with_state(TodoState::new(todos), logger.clone()), logger)
    }

    #[test]
    fn test_action_mapping() {
        let item = TodoItem::new("mapped");
        let cases = vec![
            (
                ServerMessage::ItemCreated { item: item.clone() },
                TodoAction::Add(item.clone()),
            ),
            (
                ServerMessage::ItemUpdated { item: item.clone() },
                TodoAction::Update(item.clone()),
            ),
            (
                ServerMessage::ItemDeleted { id: item.id },
                TodoAction::Delete(item.id),
            ),
            (
                ServerMessage::ItemCompleted { item: item.clone() },
                TodoAction::Complete(item.clone()),
            ),
            (
                ServerMessage::ItemReset { item: item.clone() },
                TodoAction::Reset(item.clone()),
            ),
        ];

        for (msg, expected) in cases {
            assert_eq!(action_for(&msg), Some(expected));
        }
        assert_eq!(action_for(&ServerMessage::Pong), None);
    }

    #[test]
    fn test_replaying_events_twice_is_idempotent() {
        let item = TodoItem::new("echoed");
        let completed = TodoItem {
            completed: true,
            ..item.clone()
        };
        let renamed = TodoItem {
            title: Some("renamed".to_string()),
            ..item.clone()
        };

        for msg in [
            ServerMessage::ItemCreated { item: item.clone() },
            ServerMessage::ItemCreated {
                item: TodoItem::new("brand new"),
            },
            ServerMessage::ItemUpdated { item: renamed },
            ServerMessage::ItemCompleted { item: completed },
            ServerMessage::ItemReset { item: item.clone() },
            ServerMessage::ItemDeleted { id: item.id },
        ] {
            let bridge = bridge_with(vec![item.clone(), TodoItem::new("other")]);
            bridge.apply(&msg);
            let once = bridge.store().state();
            bridge.apply(&msg);
            assert_eq!(*bridge.store().state(), *once, "{:?}", msg);
        }
    }

    #[test]
    fn test_pong_does_not_dispatch() {
        let bridge = bridge_with(Vec::new());
        assert!(!bridge.apply(&ServerMessage::Pong));
        assert_eq!(bridge.store().dispatched(), 0);
    }

    #[test]
    fn test_created_event_appends() {
        let bridge = bridge_with(vec![TodoItem::new("existing")]);
        let item = TodoItem::new("from elsewhere");
        assert!(bridge.apply(&ServerMessage::ItemCreated { item: item.clone() }));

        let state = bridge.store().state();
        assert_eq!(state.len(), 2);
        assert_eq!(state.todos.last(), Some(&item));
    }
}
