use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::gateway::{ChatGateway, GatewayError};

use super::filter::ChannelFilter;

/// Body of a client submission. `message` stays optional so a missing
/// field is reported as a validation failure rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// The only thing a caller ever learns about its submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

#[derive(Debug)]
pub enum RelayError {
    Validation(&'static str),
    Gateway(GatewayError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Gateway(GatewayError::Network(_)) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Validation(msg) => write!(f, "invalid submission: {msg}"),
            RelayError::Gateway(e) => write!(f, "{e}"),
        }
    }
}

impl From<GatewayError> for RelayError {
    fn from(e: GatewayError) -> Self {
        RelayError::Gateway(e)
    }
}

/// Forwards client submissions into the relayed channel.
pub struct InboundRelay {
    gateway: Arc<dyn ChatGateway>,
    channel: ChannelFilter,
}

impl InboundRelay {
    pub fn new(gateway: Arc<dyn ChatGateway>, channel: ChannelFilter) -> Self {
        Self { gateway, channel }
    }

    /// Validates and forwards one submission, resolving only once the
    /// platform has accepted or rejected it.
    pub async fn submit(&self, message: Option<&str>) -> Result<(), RelayError> {
        let text = match message {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(RelayError::Validation("message must not be empty")),
        };

        self.gateway
            .send_to_channel(self.channel.channel_id(), text)
            .await?;
        Ok(())
    }
}
