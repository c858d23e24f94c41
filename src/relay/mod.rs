pub mod broadcaster;
pub mod filter;
pub mod heartbeat;
pub mod inbound;
pub mod message;
pub mod registry;
pub mod socket;

pub use broadcaster::{Broadcaster, Delivery};
pub use filter::ChannelFilter;
pub use heartbeat::Heartbeat;
pub use inbound::{Ack, InboundRelay, RelayError, SubmitMessage};
pub use message::RelayMessage;
pub use registry::{ClientConnection, ClientRegistry};
