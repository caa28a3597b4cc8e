use crate::error::{ClientError, ClientResult};
use crate::logger::{Logger, NoopLogger};
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use todo_server::models::api::{ClientMessage, ServerMessage};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval, sleep, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket client for the real-time hub
#[derive(Clone)]
pub struct WebSocketClient {
    url: String,
    ping_interval: Duration,
    pong_timeout: Duration,
    reconnect_delay: Option<Duration>,
    logger: Arc<dyn Logger>,
}

impl WebSocketClient {
    /// Create a new WebSocket client that reconnects after one second
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ping_interval: Duration::from_secs(30),
            pong_timeout: Duration::from_secs(60),
            reconnect_delay: Some(Duration::from_secs(1)),
            logger: Arc::new(NoopLogger),
        }
    }

    /// Create a new WebSocket client with custom ping/pong settings
    pub fn with_ping_config(
        url: impl Into<String>,
        ping_interval: Duration,
        pong_timeout: Duration,
    ) -> Self {
        Self {
            ping_interval,
            pong_timeout,
            ..Self::new(url)
        }
    }

    /// Delay between reconnect attempts; `None` disables reconnecting
    pub fn with_reconnect_delay(mut self, delay: Option<Duration>) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect to the hub and return a handle for communication.
    ///
    /// The first connection attempt is made here and its failure is
    /// returned. Once connected, a dropped connection is re-established in
    /// the background. Events published while disconnected are lost.
    pub async fn connect(&self) -> ClientResult<WebSocketHandle> {
        let stream = self.open().await?;
        self.logger.info(&format!("Connected to {}", self.url));

        let (tx_to_ws, rx_from_user) = mpsc::unbounded_channel::<ClientMessage>();
        let (tx_to_user, rx_from_ws) = mpsc::unbounded_channel::<ServerMessage>();
        let status = Arc::new(ConnectionStatus::default());

        let client = self.clone();
        let task_status = status.clone();
        let task = tokio::spawn(async move {
            client
                .supervise(stream, tx_to_user, rx_from_user, task_status)
                .await;
        });

        Ok(WebSocketHandle {
            tx: tx_to_ws,
            rx: rx_from_ws,
            status,
            task,
        })
    }

    async fn open(&self) -> ClientResult<WsStream> {
        let (stream, _) = connect_async(&self.url)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        Ok(stream)
    }

    /// Keep a connection alive until the handle goes away
    async fn supervise(
        &self,
        mut stream: WsStream,
        tx_to_user: mpsc::UnboundedSender<ServerMessage>,
        mut rx_from_user: mpsc::UnboundedReceiver<ClientMessage>,
        status: Arc<ConnectionStatus>,
    ) {
        loop {
            status.connected.store(true, Ordering::SeqCst);
            let end = self.pump(stream, &tx_to_user, &mut rx_from_user).await;
            status.connected.store(false, Ordering::SeqCst);

            if end == ConnectionEnd::HandleDropped {
                self.logger.debug("Handle dropped, closing hub connection");
                return;
            }

            let Some(delay) = self.reconnect_delay else {
                self.logger.warn("Hub connection lost, reconnect disabled");
                return;
            };

            self.logger.warn("Hub connection lost, reconnecting");
            stream = loop {
                sleep(delay).await;
                if tx_to_user.is_closed() {
                    return;
                }
                match self.open().await {
                    Ok(stream) => break stream,
                    Err(e) => self.logger.debug(&format!("Reconnect failed: {}", e)),
                }
            };

            let attempts = status.reconnects.fetch_add(1, Ordering::SeqCst) + 1;
            self.logger
                .info(&format!("Reconnected to {} (#{})", self.url, attempts));
        }
    }

    /// Shuttle messages over one connection until it ends
    async fn pump(
        &self,
        stream: WsStream,
        tx_to_user: &mpsc::UnboundedSender<ServerMessage>,
        rx_from_user: &mut mpsc::UnboundedReceiver<ClientMessage>,
    ) -> ConnectionEnd {
        let (mut write, mut read) = stream.split();
        let mut ping_timer = interval(self.ping_interval);
        let mut last_pong = Instant::now();

        loop {
            tokio::select! {
                _ = ping_timer.tick() => {
                    if last_pong.elapsed() > self.pong_timeout {
                        self.logger.warn("No pong received, connection dead");
                        return ConnectionEnd::Lost;
                    }
                    if send(&mut write, &ClientMessage::Ping).await.is_err() {
                        return ConnectionEnd::Lost;
                    }
                }

                outgoing = rx_from_user.recv() => {
                    let Some(msg) = outgoing else {
                        let _ = write.close().await;
                        return ConnectionEnd::HandleDropped;
                    };
                    if let Err(e) = send(&mut write, &msg).await {
                        self.logger.error(&format!("WebSocket send error: {}", e));
                        return ConnectionEnd::Lost;
                    }
                }

                incoming = read.next() => match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerMessage>(&text) {
                            Ok(msg) => {
                                if msg == ServerMessage::Pong {
                                    last_pong = Instant::now();
                                }
                                if tx_to_user.send(msg).is_err() {
                                    let _ = write.close().await;
                                    return ConnectionEnd::HandleDropped;
                                }
                            }
                            Err(e) => {
                                self.logger.warn(&format!("Failed to parse server message: {}", e));
                            }
                        }
                    }
                    Some(Ok(Message::Pong(_))) => last_pong = Instant::now(),
                    Some(Ok(Message::Close(_))) | None => return ConnectionEnd::Lost,
                    Some(Err(e)) => {
                        self.logger.error(&format!("WebSocket error: {}", e));
                        return ConnectionEnd::Lost;
                    }
                    Some(Ok(_)) => {}
                },
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionEnd {
    Lost,
    HandleDropped,
}

#[derive(Debug, Default)]
struct ConnectionStatus {
    connected: AtomicBool,
    reconnects: AtomicU32,
}

async fn send<S>(write: &mut S, msg: &ClientMessage) -> ClientResult<()>
where
    S: futures_util::Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = serde_json::to_string(msg)?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::WebSocketError(e.to_string()))
}

/// Handle for sending and receiving hub messages
///
/// Dropping the handle closes the connection and stops reconnecting.
pub struct WebSocketHandle {
    tx: mpsc::UnboundedSender<ClientMessage>,
    rx: mpsc::UnboundedReceiver<ServerMessage>,
    status: Arc<ConnectionStatus>,
    task: tokio::task::JoinHandle<()>,
}

impl WebSocketHandle {
    /// Send an application-level ping; the server answers with `pong`
    pub fn ping(&self) -> ClientResult<()> {
        self.tx
            .send(ClientMessage::Ping)
            .map_err(|e| ClientError::WebSocketError(e.to_string()))
    }

    /// Receive the next message from the server. Returns `None` once the
    /// connection is gone for good.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        self.rx.recv().await
    }

    /// Try to receive a message without blocking
    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.rx.try_recv().ok()
    }

    pub fn is_connected(&self) -> bool {
        self.status.connected.load(Ordering::SeqCst)
    }

    /// How many times the connection has been re-established
    pub fn reconnects(&self) -> u32 {
        self.status.reconnects.load(Ordering::SeqCst)
    }

    /// Close the connection and wait for the background task to finish
    pub async fn close(self) {
        let WebSocketHandle { tx, rx, task, .. } = self;
        drop(tx);
        drop(rx);
        let _ = task.await;
    }
}
