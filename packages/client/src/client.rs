use crate::error::{ClientError, ClientResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use todo_server::models::{api::TodoPayload, domain::TodoItem};
use uuid::Uuid;

/// REST API client for the todo server
#[derive(Clone)]
pub struct TodoClient {
    base_url: String,
    client: Client,
}

impl TodoClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// WebSocket URL of the real-time hub on the same server
    pub fn hub_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}/todoHub", ws_base)
    }

    /// Health check
    pub async fn health(&self) -> Health {
        let url = format!("{}/api/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => Health::Up,
            Ok(response) => Health::Degraded(response.status().as_u16()),
            Err(e) => Health::Down(e.to_string()),
        }
    }

    // ===== Todo Endpoints =====

    /// Fetch the full list
    pub async fn list_todos(&self) -> ClientResult<Vec<TodoItem>> {
        let url = format!("{}/api/todos", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response, None).await
    }

    /// Fetch a single todo
    pub async fn get_todo(&self, id: Uuid) -> ClientResult<TodoItem> {
        let response = self.client.get(self.todo_url(id)).send().await?;
        Self::parse(response, Some(id)).await
    }

    /// Create a todo with the given title
    pub async fn create_todo(&self, title: impl Into<String>) -> ClientResult<TodoItem> {
        self.create(&TodoPayload::titled(title)).await
    }

    /// Create a todo from a full payload. The server ignores `payload.id`.
    pub async fn create(&self, payload: &TodoPayload) -> ClientResult<TodoItem> {
        let url = format!("{}/api/todos", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::parse(response, None).await
    }

    /// Overwrite title and completion flag
    pub async fn update_todo(
        &self,
        id: Uuid,
        title: Option<String>,
        completed: bool,
    ) -> ClientResult<TodoItem> {
        let payload = TodoPayload {
            id: Some(id),
            title,
            completed,
        };
        let response = self
            .client
            .put(self.todo_url(id))
            .json(&payload)
            .send()
            .await?;
        Self::parse(response, Some(id)).await
    }

    /// Delete a todo
    pub async fn delete_todo(&self, id: Uuid) -> ClientResult<()> {
        let response = self.client.delete(self.todo_url(id)).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }

    /// Mark a todo as completed
    pub async fn complete_todo(&self, id: Uuid) -> ClientResult<TodoItem> {
        let url = format!("{}/complete", self.todo_url(id));
        let response = self.client.put(&url).send().await?;
        Self::parse(response, Some(id)).await
    }

    /// Mark a todo as not completed
    pub async fn reset_todo(&self, id: Uuid) -> ClientResult<TodoItem> {
        let url = format!("{}/reset", self.todo_url(id));
        let response = self.client.put(&url).send().await?;
        Self::parse(response, Some(id)).await
    }

    // ===== Internal Helper Methods =====

    fn todo_url(&self, id: Uuid) -> String {
        format!("{}/api/todos/{}", self.base_url, id)
    }

    async fn parse<T: DeserializeOwned>(response: Response, id: Option<Uuid>) -> ClientResult<T> {
        let response = Self::check(response, id).await?;
        Ok(response.json().await?)
    }

    async fn check(response: Response, id: Option<Uuid>) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ClientError::NotFound { id });
        }

        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(ClientError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Result of a health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Up,
    Degraded(u16),
    Down(String),
}
