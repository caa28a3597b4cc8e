/// Test helpers for client integration tests
///
/// Fixture setup may seed the store directly, but all assertions go through
/// the client API.
use std::sync::Arc;
use std::time::Duration;
use todo_client::{
    Bridge, Logger, NoopLogger, ServerMessage, Store, TodoClient, WebSocketClient,
    WebSocketHandle,
};
use todo_test_utils::TestServer;

/// Test fixture that provides a running server and a REST client
#[allow(dead_code)]
pub struct TestFixture {
    pub server: TestServer,
    pub client: TodoClient,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with an empty store
    pub async fn new() -> anyhow::Result<Self> {
        let server = TestServer::start().await?;
        let client = TodoClient::new(&server.base_url);
        Ok(Self { server, client })
    }

    /// Connect to the hub and wait until the server side is subscribed
    pub async fn connect_hub(&self) -> anyhow::Result<WebSocketHandle> {
        let mut handle = WebSocketClient::new(&self.server.ws_url).connect().await?;
        handle.ping()?;
        let reply = next_message(&mut handle).await;
        anyhow::ensure!(reply == Some(ServerMessage::Pong), "expected pong, got {:?}", reply);
        Ok(handle)
    }

    /// A fresh bridge over an empty store, silent logger
    pub fn bridge(&self) -> Bridge {
        let logger: Arc<dyn Logger> = Arc::new(NoopLogger);
        Bridge::new(Store::new(logger.clone()), logger)
    }
}

/// Receive the next message or `None` after a short timeout
#[allow(dead_code)]
pub async fn next_message(handle: &mut WebSocketHandle) -> Option<ServerMessage> {
    tokio::time::timeout(Duration::from_secs(2), handle.recv())
        .await
        .ok()
        .flatten()
}

/// Receive the next message that is not a pong
#[allow(dead_code)]
pub async fn next_event(handle: &mut WebSocketHandle) -> Option<ServerMessage> {
    loop {
        match next_message(handle).await? {
            ServerMessage::Pong => continue,
            msg => return Some(msg),
        }
    }
}
