//! Shared harness: a real server on an ephemeral port.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use codepair_gateway::api;
use codepair_gateway::app_state::AppState;
use codepair_gateway::config::SessionSettings;
use codepair_gateway::domain::{Room, RoomId};
use codepair_gateway::error::GatewayError;
use codepair_gateway::persistence::{InMemoryRoomStore, RoomStore};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Client side of one room connection.
pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound for any single wait in these tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// A running gateway plus handles to its internals.
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
    /// State shared with the server.
    pub state: AppState,
}

impl TestServer {
    /// Starts a server over an in-memory store with default settings.
    pub async fn start() -> Self {
        Self::with_store(Arc::new(InMemoryRoomStore::new()), SessionSettings::default()).await
    }

    /// Starts a server over the given store and settings.
    pub async fn with_store(store: Arc<dyn RoomStore>, settings: SessionSettings) -> Self {
        let state = AppState::new(store, settings, "codepair-test".to_string());
        let app = api::build_app(state.clone());
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, state }
    }

    /// Base HTTP URL.
    pub fn http(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// WebSocket URL for a room.
    pub fn ws_url(&self, room: &str) -> String {
        format!("ws://{}/api/v1/ws/{}", self.addr, room)
    }

    /// Connects to a room and returns the client with its initial state.
    pub async fn join(&self, room: &str) -> (Client, String) {
        let Ok((mut client, _)) = connect_async(self.ws_url(room)).await else {
            panic!("websocket connect failed");
        };
        let initial = recv_text(&mut client).await;
        (client, initial)
    }

    /// Persisted text for a room, if any.
    pub async fn stored(&self, room: &str) -> Option<String> {
        let Ok(id) = RoomId::parse(room) else {
            panic!("valid room id");
        };
        match self.state.store.load(&id).await {
            Ok(room) => room.map(|r| r.code_content),
            Err(err) => panic!("store load failed: {err}"),
        }
    }

    /// Waits until the store holds `expected` for `room`.
    pub async fn wait_stored(&self, room: &str, expected: &str) {
        let deadline = tokio::time::Instant::now() + WAIT;
        while tokio::time::Instant::now() < deadline {
            if self.stored(room).await.as_deref() == Some(expected) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room {room} never stored {expected:?}");
    }

    /// Waits until the registry lists exactly `count` members in `room`.
    pub async fn wait_members(&self, room: &str, count: usize) {
        let Ok(id) = RoomId::parse(room) else {
            panic!("valid room id");
        };
        let deadline = tokio::time::Instant::now() + WAIT;
        while tokio::time::Instant::now() < deadline {
            if self.state.registry.members_of(&id).await.len() == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room {room} never reached {count} members");
    }
}

/// Sends one text frame.
pub async fn send_text(client: &mut Client, text: &str) {
    if client.send(Message::text(text.to_string())).await.is_err() {
        panic!("send failed");
    }
}

/// Receives the next text frame, skipping control frames.
pub async fn recv_text(client: &mut Client) -> String {
    loop {
        let Ok(next) = tokio::time::timeout(WAIT, client.next()).await else {
            panic!("timed out waiting for a message");
        };
        match next {
            Some(Ok(Message::Text(text))) => return text.to_string(),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

/// Asserts nothing arrives within a short window.
pub async fn assert_silent(client: &mut Client) {
    if let Ok(Some(Ok(Message::Text(text)))) =
        tokio::time::timeout(Duration::from_millis(150), client.next()).await
    {
        panic!("unexpected message: {text}");
    }
}

/// Room store whose reads, writes and probes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: InMemoryRoomStore,
    /// When set, `load`, `save` and `ping` fail.
    pub broken: AtomicBool,
}

impl FlakyStore {
    /// Toggles failure mode.
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), GatewayError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(GatewayError::PersistenceError("store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RoomStore for FlakyStore {
    async fn load(&self, room_id: &RoomId) -> Result<Option<Room>, GatewayError> {
        self.check()?;
        self.inner.load(room_id).await
    }

    async fn save(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError> {
        self.check()?;
        self.inner.save(room_id, text).await
    }

    async fn create(&self, room_id: &RoomId) -> Result<Room, GatewayError> {
        self.inner.create(room_id).await
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.check()
    }
}
