use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Todo '{id}' not found")]
    TodoNotFound { id: Uuid },

    #[error("UUID parse error: {0}")]
    UuidParseError(#[from] uuid::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl TodoError {
    /// Error code for the JSON body; `None` when the response has no body
    fn error_code(&self) -> Option<&'static str> {
        match self {
            TodoError::TodoNotFound { .. } => None,
            TodoError::UuidParseError(_) => Some("UUID_PARSE_ERROR"),
        }
    }

    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            TodoError::TodoNotFound { .. } => StatusCode::NOT_FOUND,
            TodoError::UuidParseError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let Some(code) = self.error_code() else {
            log::debug!("{}", self);
            return status.into_response();
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
