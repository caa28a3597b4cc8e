use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod broadcast;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;

use api::{rest, ws};
use broadcast::Broadcaster;
use models::domain::TodoEvent;
use store::TodoStore;

/// Shared state handed to every REST handler and hub connection
#[derive(Clone)]
pub struct AppState {
    pub store: TodoStore,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(store: TodoStore, broadcaster: Broadcaster) -> Self {
        Self { store, broadcaster }
    }
}

impl ws::WsState for AppState {
    fn event_tx(&self) -> &tokio::sync::broadcast::Sender<TodoEvent> {
        self.broadcaster.sender()
    }
}

/// Full application router: REST API, OpenAPI docs and the real-time hub
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(rest::create_rest())
        .merge(ws::create_ws())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
