use tokio::sync::mpsc;

/// A message observed on the chat platform, in platform delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub channel_id: u64,
    pub author: String,
    pub content: String,
}

/// Producer half of the gateway event stream. Cloned into the platform
/// event handler.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<InboundEvent>,
}

impl EventSink {
    /// Returns false once the consumer has gone away.
    pub fn emit(&self, event: InboundEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer half: a lazy, unbounded, non-restartable sequence of inbound
/// events.
pub struct GatewayEvents {
    rx: mpsc::UnboundedReceiver<InboundEvent>,
}

impl GatewayEvents {
    pub fn channel() -> (EventSink, GatewayEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx }, GatewayEvents { rx })
    }

    /// Next event, or `None` once every sink has been dropped.
    pub async fn next(&mut self) -> Option<InboundEvent> {
        self.rx.recv().await
    }
}
