use thiserror::Error;
use uuid::Uuid;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Todo '{id}' not found")]
    NotFound { id: Uuid },

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
