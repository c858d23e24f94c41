use crate::gateway::{GatewayEvents, InboundEvent};

use super::filter::ChannelFilter;
use super::message::RelayMessage;
use super::registry::ClientRegistry;

/// Outcome of fanning one event out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub removed: usize,
}

/// Pushes qualifying gateway events to every registered client.
#[derive(Clone)]
pub struct Broadcaster {
    registry: ClientRegistry,
    filter: ChannelFilter,
}

impl Broadcaster {
    pub fn new(registry: ClientRegistry, filter: ChannelFilter) -> Self {
        Self { registry, filter }
    }

    /// Fans one event out. Returns `None` when the event is not for the
    /// relayed channel.
    ///
    /// Clients whose queue is closed are dropped from the registry in the
    /// same call, before anything else can touch the registry on their
    /// behalf. Nobody else is affected by their failure.
    pub fn on_gateway_event(&self, event: &InboundEvent) -> Option<Delivery> {
        if !self.filter.matches(event) {
            return None;
        }

        let message = RelayMessage::from(event.clone());
        let frame = match message.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("failed to encode relay frame: {e}");
                return Some(Delivery::default());
            }
        };

        let mut delivery = Delivery::default();
        for conn in self.registry.snapshot() {
            if conn.push(frame.clone()) {
                delivery.delivered += 1;
            } else {
                self.registry.unregister(&conn.id);
                delivery.removed += 1;
                tracing::debug!("dropped unreachable client {}", conn.id);
            }
        }
        Some(delivery)
    }

    /// Consumes the gateway event stream until the session side hangs up.
    pub async fn run(self, mut events: GatewayEvents) {
        while let Some(event) = events.next().await {
            if let Some(delivery) = self.on_gateway_event(&event) {
                tracing::debug!(
                    "relayed message from {} to {} client(s), {} removed",
                    event.author,
                    delivery.delivered,
                    delivery.removed
                );
            }
        }
        tracing::info!("gateway event stream ended");
    }
}
