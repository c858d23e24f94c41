use serde::Serialize;

use crate::gateway::InboundEvent;

/// A message in transit between the platform and the clients. Serializes to
/// the push frame `{"username": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayMessage {
    #[serde(rename = "username")]
    pub author: String,
    pub content: String,
    #[serde(skip)]
    pub channel_id: u64,
}

impl RelayMessage {
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<InboundEvent> for RelayMessage {
    fn from(event: InboundEvent) -> Self {
        Self {
            author: event.author,
            content: event.content,
            channel_id: event.channel_id,
        }
    }
}
