#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use guildrelay::ai::GeminiClient;
use guildrelay::gateway::{ChatGateway, EventSink, GatewayError, GatewayEvents, InboundEvent, SessionState};
use guildrelay::relay::{Broadcaster, ChannelFilter, ClientRegistry, Heartbeat};
use guildrelay::routes;
use guildrelay::state::AppState;
use http::{Method, Request};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TARGET_CHANNEL: u64 = 424_242;
pub const OTHER_CHANNEL: u64 = 777;

/// In-memory stand-in for the platform session. Sent messages are recorded
/// and, when `echo` is on, fed back through the event stream the way the
/// platform would.
pub struct MockGateway {
    state: Mutex<SessionState>,
    sent: Mutex<Vec<(u64, String)>>,
    failure: Mutex<Option<GatewayError>>,
    echo: Option<(EventSink, String)>,
}

impl MockGateway {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
            sent: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            echo: None,
        }
    }

    pub fn with_echo(mut self, sink: EventSink, bot_name: &str) -> Self {
        self.echo = Some((sink, bot_name.to_string()));
        self
    }

    pub fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap() = state;
    }

    /// Every following send fails with `err`.
    pub fn fail_with(&self, err: GatewayError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn sent(&self) -> Vec<(u64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    fn identity(&self) -> Option<String> {
        match self.state() {
            SessionState::Ready => Some("relay-bot#0001".to_string()),
            _ => None,
        }
    }

    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<(), GatewayError> {
        if self.state() != SessionState::Ready {
            return Err(GatewayError::Network("gateway session is not ready".to_string()));
        }
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push((channel_id, text.to_string()));
        if let Some((sink, bot)) = &self.echo {
            sink.emit(InboundEvent {
                channel_id,
                author: bot.clone(),
                content: text.to_string(),
            });
        }
        Ok(())
    }
}

/// Full relay wired to a [`MockGateway`], with the broadcaster running.
pub struct TestServer {
    pub state: AppState,
    pub gateway: Arc<MockGateway>,
    pub registry: ClientRegistry,
    pub events: EventSink,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_session(SessionState::Ready).await
    }

    pub async fn with_session(session: SessionState) -> Self {
        Self::build(session, false).await
    }

    /// Sends made through the relay come back as gateway events.
    pub async fn with_echo() -> Self {
        Self::build(SessionState::Ready, true).await
    }

    async fn build(session: SessionState, echo: bool) -> Self {
        let (sink, events) = GatewayEvents::channel();
        let mut gateway = MockGateway::new(session);
        if echo {
            gateway = gateway.with_echo(sink.clone(), "relay-bot");
        }
        let gateway = Arc::new(gateway);
        let registry = ClientRegistry::new();
        let channel = ChannelFilter::new(TARGET_CHANNEL);

        tokio::spawn(Broadcaster::new(registry.clone(), channel).run(events));

        let state = AppState::new(gateway.clone(), registry.clone(), channel);
        Self {
            state,
            gateway,
            registry,
            events: sink,
        }
    }

    pub fn with_gemini(mut self, client: GeminiClient) -> Self {
        self.state = self.state.with_gemini(client);
        self
    }

    pub fn with_legacy_status(mut self) -> Self {
        self.state = self.state.with_legacy_status(true);
        self
    }

    /// Pings every `interval` and drops peers silent for `timeout`.
    pub fn with_heartbeat(mut self, interval: Duration, timeout: Duration) -> Self {
        self.state = self.state.with_heartbeat(Heartbeat { interval, timeout });
        self
    }

    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Binds port 0, serves the API and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("127.0.0.1:{}", addr.port())
    }

    /// Serves the push-only router, as on the dedicated WebSocket port.
    pub async fn spawn_push(&self) -> String {
        let app = routes::push_router(self.state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("127.0.0.1:{}", addr.port())
    }

    /// Injects a platform message into the gateway event stream.
    pub fn inbound(&self, channel_id: u64, author: &str, content: &str) {
        self.events.emit(InboundEvent {
            channel_id,
            author: author.to_string(),
            content: content.to_string(),
        });
    }

    /// Waits until the registry holds exactly `n` clients.
    pub async fn wait_for_clients(&self, n: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while self.registry.len() != n {
            assert!(
                tokio::time::Instant::now() < deadline,
                "expected {n} clients, registry has {}",
                self.registry.len()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Request builder helpers
// ---------------------------------------------------------------------------

pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn raw_json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn test_app() -> axum::Router {
    TestServer::new().await.router()
}
