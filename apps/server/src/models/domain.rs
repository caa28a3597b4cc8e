use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================================
// DOMAIN TYPES
// ============================================================================

/// A single todo entry held by the item store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoItem {
    pub id: Uuid,
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            completed: false,
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Change events published on the broadcast channel after a store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    Created { item: TodoItem },
    Updated { item: TodoItem },
    Deleted { id: Uuid },
    Completed { item: TodoItem },
    Reset { item: TodoItem },
}

impl TodoEvent {
    /// Wire name of the event as seen by hub clients
    pub fn name(&self) -> &'static str {
        match self {
            TodoEvent::Created { .. } => "item-created",
            TodoEvent::Updated { .. } => "item-updated",
            TodoEvent::Deleted { .. } => "item-deleted",
            TodoEvent::Completed { .. } => "item-completed",
            TodoEvent::Reset { .. } => "item-reset",
        }
    }

    /// Identifier of the item the event refers to
    pub fn item_id(&self) -> Uuid {
        match self {
            TodoEvent::Created { item }
            | TodoEvent::Updated { item }
            | TodoEvent::Completed { item }
            | TodoEvent::Reset { item } => item.id,
            TodoEvent::Deleted { id } => *id,
        }
    }
}
