//! The single session with the chat platform.
//!
//! [`discord::DiscordGateway`] owns the connection: inbound messages leave
//! through an [`events::GatewayEvents`] stream, outbound messages enter
//! through [`ChatGateway::send_to_channel`]. Reconnection is not part of the
//! session itself; see [`supervisor`].

pub mod discord;
pub mod error;
pub mod events;
pub mod session;
pub mod supervisor;

use async_trait::async_trait;

pub use error::GatewayError;
pub use events::{EventSink, GatewayEvents, InboundEvent};
pub use session::{SessionState, SessionTracker};

/// Send side of the platform session, as seen by the relay endpoint.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    fn state(&self) -> SessionState;

    fn identity(&self) -> Option<String>;

    /// Posts `text` to the channel. Requires a Ready session. The message
    /// will also come back through the session's own event stream.
    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<(), GatewayError>;
}
