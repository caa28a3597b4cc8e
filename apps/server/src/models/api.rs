use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::domain::TodoItem;

// ============================================================================
// REST API TYPES
// ============================================================================

#[derive(Serialize, ToSchema)]
pub struct ApiResponse {
    pub message: String,
    pub timestamp: u64,
}

/// Request body for create and update
///
/// Mirrors the `TodoItem` shape so clients can send an item back as-is. The
/// `id` is accepted but never trusted: create assigns a fresh one and update
/// takes it from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TodoPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoPayload {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            completed: false,
        }
    }
}

impl From<TodoItem> for TodoPayload {
    fn from(item: TodoItem) -> Self {
        Self {
            id: Some(item.id),
            title: item.title,
            completed: item.completed,
        }
    }
}

// ============================================================================
// WEBSOCKET MESSAGE TYPES (Client → Server)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
}

// ============================================================================
// WEBSOCKET MESSAGE TYPES (Server → Client)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    // Item change notifications
    ItemCreated { item: TodoItem },
    ItemUpdated { item: TodoItem },
    ItemDeleted { id: Uuid },
    ItemCompleted { item: TodoItem },
    ItemReset { item: TodoItem },

    // Connection management
    Pong,
}
