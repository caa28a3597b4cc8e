pub mod api;
pub mod domain;

pub use api::{ApiResponse, ClientMessage, ServerMessage, TodoPayload};
pub use domain::{TodoEvent, TodoItem};
