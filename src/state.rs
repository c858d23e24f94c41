use std::sync::Arc;

use crate::ai::GeminiClient;
use crate::gateway::ChatGateway;
use crate::relay::{ChannelFilter, ClientRegistry, Heartbeat, InboundRelay};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ChatGateway>,
    pub registry: ClientRegistry,
    pub relay: Arc<InboundRelay>,
    pub channel: ChannelFilter,
    pub gemini: Option<Arc<GeminiClient>>,
    pub legacy_status: bool,
    pub heartbeat: Heartbeat,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ChatGateway>, registry: ClientRegistry, channel: ChannelFilter) -> Self {
        let relay = Arc::new(InboundRelay::new(gateway.clone(), channel));
        Self {
            gateway,
            registry,
            relay,
            channel,
            gemini: None,
            legacy_status: false,
            heartbeat: Heartbeat::default(),
        }
    }

    pub fn with_gemini(mut self, client: GeminiClient) -> Self {
        self.gemini = Some(Arc::new(client));
        self
    }

    pub fn with_legacy_status(mut self, legacy: bool) -> Self {
        self.legacy_status = legacy;
        self
    }

    pub fn with_heartbeat(mut self, heartbeat: Heartbeat) -> Self {
        self.heartbeat = heartbeat;
        self
    }
}
