use todo_server::broadcast::Broadcaster;
use todo_server::models::domain::TodoItem;
use todo_server::store::TodoStore;
use todo_server::{create_app, AppState};

/// Handle to a running test server
pub struct TestServer {
    pub base_url: String,
    pub ws_url: String,
    pub state: AppState,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Start a test HTTP server with an empty store on a random available port
    ///
    /// Mimics the production server setup in main.rs: same router, same
    /// REST + hub routes, in-memory store and broadcaster.
    ///
    /// The server runs in the background and will shutdown when dropped.
    pub async fn start() -> anyhow::Result<Self> {
        Self::with_items(Vec::new()).await
    }

    /// Start a test server whose store already holds `items`
    pub async fn with_items(items: Vec<TodoItem>) -> anyhow::Result<Self> {
        let state = AppState::new(TodoStore::with_items(items), Broadcaster::new(256));
        let app = create_app(state.clone());

        // Bind to random available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let base_url = format!("http://{}", addr);
        let ws_url = format!("ws://{}/todoHub", addr);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed to start");
        });

        Ok(Self {
            base_url,
            ws_url,
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Build full HTTP URL for a path
    ///
    /// # Example
    /// ```ignore
    /// let url = server.url("/api/todos");
    /// let response = reqwest::get(&url).await?;
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of hub connections currently subscribed to the broadcaster
    pub fn hub_connections(&self) -> usize {
        self.state.broadcaster.receiver_count()
    }
}
