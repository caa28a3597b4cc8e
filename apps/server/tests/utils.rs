use todo_server::broadcast::Broadcaster;
use todo_server::models::domain::TodoItem;
use todo_server::store::TodoStore;
use todo_server::{create_app, AppState};

/// Test server bound to a random local port
#[allow(dead_code)]
pub struct TestServer {
    pub address: String,
    pub state: AppState,
    client: reqwest::Client,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

#[allow(dead_code)]
impl TestServer {
    /// Start a server with an empty store
    pub async fn start() -> anyhow::Result<Self> {
        Self::with_items(Vec::new()).await
    }

    /// Start a server whose store is pre-populated with `items`
    pub async fn with_items(items: Vec<TodoItem>) -> anyhow::Result<Self> {
        let state = AppState::new(TodoStore::with_items(items), Broadcaster::new(64));
        let app = create_app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed to start");
        });

        Ok(Self {
            address: format!("http://{}", addr),
            state,
            client: reqwest::Client::new(),
            _shutdown_tx: shutdown_tx,
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("{}{}", self.address.replacen("http://", "ws://", 1), path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    pub async fn put(&self, path: &str) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request")
    }
}
