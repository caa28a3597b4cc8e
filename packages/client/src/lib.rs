//! Todo client
//!
//! Rust client for the todo server.
//!
//! This crate provides:
//! - REST client for the todo CRUD endpoints
//! - WebSocket client for the real-time hub, with automatic reconnect
//! - A state container holding the local copy of the list
//! - A bridge that applies hub events to that state container
//! - Configurable logging
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_client::{Bridge, ConsoleLogger, LogLevel, Logger, Store, TodoClient, WebSocketClient};
//!
//! #[tokio::main]
//! async fn main() -> todo_client::ClientResult<()> {
//!     let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new(LogLevel::Info));
//!     let client = TodoClient::new("http://localhost:8888");
//!
//!     // Mirror the server's list locally
//!     let bridge = Bridge::new(Store::new(logger.clone()), logger.clone());
//!     let mut hub = WebSocketClient::new(client.hub_url())
//!         .with_logger(logger)
//!         .connect()
//!         .await?;
//!     bridge.sync(&client).await?;
//!
//!     // Changes from any client now land in bridge.store()
//!     client.create_todo("Buy milk").await?;
//!     bridge.run(&mut hub).await;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod client;
pub mod error;
pub mod logger;
pub mod state;
pub mod websocket;

pub use bridge::{action_for, Bridge};
pub use client::{Health, TodoClient};
pub use error::{ClientError, ClientResult};
pub use logger::{ConsoleLogger, LogLevel, Logger, NoopLogger};
pub use state::{reduce, HistoryEntry, Store, TodoAction, TodoState};
pub use websocket::{WebSocketClient, WebSocketHandle};

// Re-export server types for convenience
pub use todo_server::models::api::{ClientMessage, ServerMessage, TodoPayload};
pub use todo_server::models::domain::TodoItem;
