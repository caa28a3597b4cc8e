use crate::models::api::ServerMessage;
use crate::models::domain::TodoEvent;

/// Convert a TodoEvent to a ServerMessage for hub transmission
impl From<TodoEvent> for ServerMessage {
    fn from(event: TodoEvent) -> Self {
        match event {
            TodoEvent::Created { item } => ServerMessage::ItemCreated { item },
            TodoEvent::Updated { item } => ServerMessage::ItemUpdated { item },
            TodoEvent::Deleted { id } => ServerMessage::ItemDeleted { id },
            TodoEvent::Completed { item } => ServerMessage::ItemCompleted { item },
            TodoEvent::Reset { item } => ServerMessage::ItemReset { item },
        }
    }
}
