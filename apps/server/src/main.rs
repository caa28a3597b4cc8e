use anyhow::Context;
use todo_server::broadcast::Broadcaster;
use todo_server::config::Config;
use todo_server::store::TodoStore;
use todo_server::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; both files are optional
    dotenvy::from_filename(".env.defaults").ok();
    dotenvy::dotenv().ok();

    env_logger::init();

    // Server configuration
    let host = std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8888".to_string());
    let addr = format!("{}:{}", host, port);

    let config = Config::load().context("Failed to load config.toml")?;

    // Seed the store and set up the hub broadcaster
    let store = TodoStore::with_items(config.seed_items());
    log::info!("Seeded store with {} todo(s)", store.len().await);
    let broadcaster = Broadcaster::new(config.broadcast_capacity);

    let app = create_app(AppState::new(store, broadcaster));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;

    println!("🚀 Todo server running on http://{}", addr);
    println!("📡 Real-time hub: ws://{}/todoHub", addr);
    println!("📖 OpenAPI docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
