use crate::gateway::InboundEvent;

/// The one channel this relay bridges. Everything else is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFilter {
    channel_id: u64,
}

impl ChannelFilter {
    pub fn new(channel_id: u64) -> Self {
        Self { channel_id }
    }

    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    pub fn matches(&self, event: &InboundEvent) -> bool {
        event.channel_id == self.channel_id
    }
}
