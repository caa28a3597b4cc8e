use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Json,
};
use uuid::Uuid;

use crate::errors::{ErrorResponse, Result, TodoError};
use crate::models::api::TodoPayload;
use crate::models::domain::{TodoEvent, TodoItem};
use crate::AppState;

/// List every todo in insertion order
#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "All todos", body = [TodoItem])
    ),
    tag = "todos"
)]
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<TodoItem>> {
    Json(state.store.list().await)
}

/// Fetch a single todo
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "The todo", body = TodoItem),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoItem>> {
    let id = Uuid::parse_str(&id)?;
    let item = state
        .store
        .get(id)
        .await
        .ok_or(TodoError::TodoNotFound { id })?;
    Ok(Json(item))
}

/// Create a todo. Any `id` in the body is replaced by a server-assigned one.
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "Created", body = TodoItem)
    ),
    tag = "todos"
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(payload): Json<TodoPayload>,
) -> (StatusCode, [(header::HeaderName, String); 1], Json<TodoItem>) {
    if let Some(client_id) = payload.id {
        log::debug!("Ignoring client supplied id {} on create", client_id);
    }

    let item = state.store.create(payload.title, payload.completed).await;
    log::info!("Created todo {}", item.id);

    state
        .broadcaster
        .publish(TodoEvent::Created { item: item.clone() });

    let location = format!("/api/todos/{}", item.id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(item))
}

/// Replace title and completion flag of a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Updated", body = TodoItem),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TodoPayload>,
) -> Result<Json<TodoItem>> {
    let id = Uuid::parse_str(&id)?;
    let item = state
        .store
        .update(id, payload.title, payload.completed)
        .await
        .ok_or(TodoError::TodoNotFound { id })?;
    log::info!("Updated todo {}", id);

    state
        .broadcaster
        .publish(TodoEvent::Updated { item: item.clone() });

    Ok(Json(item))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    if !state.store.delete(id).await {
        return Err(TodoError::TodoNotFound { id });
    }
    log::info!("Deleted todo {}", id);

    state.broadcaster.publish(TodoEvent::Deleted { id });

    Ok(StatusCode::OK)
}

/// Mark a todo as completed
#[utoipa::path(
    put,
    path = "/api/todos/{id}/complete",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Completed", body = TodoItem),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoItem>> {
    let item = set_completed(&state, &id, true).await?;
    state
        .broadcaster
        .publish(TodoEvent::Completed { item: item.clone() });
    Ok(Json(item))
}

/// Mark a todo as not completed
#[utoipa::path(
    put,
    path = "/api/todos/{id}/reset",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Reset", body = TodoItem),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn reset_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoItem>> {
    let item = set_completed(&state, &id, false).await?;
    state
        .broadcaster
        .publish(TodoEvent::Reset { item: item.clone() });
    Ok(Json(item))
}

async fn set_completed(state: &AppState, id: &str, completed: bool) -> Result<TodoItem> {
    let id = Uuid::parse_str(id)?;
    let item = state
        .store
        .set_completed(id, completed)
        .await
        .ok_or(TodoError::TodoNotFound { id })?;
    log::info!("Set todo {} completed={}", id, completed);
    Ok(item)
}
