use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::models::{ApiResponse, TodoItem, TodoPayload};
use crate::AppState;

pub mod health;
pub mod todos;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "CRUD API for the shared todo list. Changes are pushed to /todoHub."
    ),
    paths(
        health::health_check,
        todos::list_todos,
        todos::get_todo,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
        todos::complete_todo,
        todos::reset_todo,
    ),
    components(
        schemas(ApiResponse, ErrorResponse, TodoItem, TodoPayload)
    ),
    tags(
        (name = "api", description = "General API endpoints"),
        (name = "todos", description = "Todo list operations")
    )
)]
pub struct ApiDoc;

pub fn create_rest() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .route(
            "/api/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route(
            "/api/todos/{id}/complete",
            axum::routing::put(todos::complete_todo),
        )
        .route("/api/todos/{id}/reset", axum::routing::put(todos::reset_todo))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}
