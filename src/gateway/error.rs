use std::fmt;

/// Failures raised at the chat platform boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credentials were rejected. Fatal: no relay until restart.
    Auth(String),
    /// Transport failure, or the session is not Ready.
    Network(String),
    ChannelNotFound(u64),
    SendFailed(String),
}

impl GatewayError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, GatewayError::Auth(_))
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Auth(msg) => write!(f, "authentication failed: {msg}"),
            GatewayError::Network(msg) => write!(f, "network error: {msg}"),
            GatewayError::ChannelNotFound(id) => write!(f, "channel {id} not found"),
            GatewayError::SendFailed(msg) => write!(f, "send failed: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<serenity::Error> for GatewayError {
    fn from(e: serenity::Error) -> Self {
        use serenity::gateway::GatewayError as ShardError;

        match e {
            serenity::Error::Gateway(ShardError::InvalidAuthentication) => {
                GatewayError::Auth("invalid bot token".to_string())
            }
            serenity::Error::Gateway(
                ShardError::InvalidGatewayIntents | ShardError::DisallowedGatewayIntents,
            ) => GatewayError::Auth("gateway intents rejected".to_string()),
            serenity::Error::Http(ref http) if http_status(http) == Some(401) => {
                GatewayError::Auth("invalid bot token".to_string())
            }
            other => GatewayError::Network(other.to_string()),
        }
    }
}

/// Classifies a failed message send. Requests the platform answered and
/// refused, or that serenity refused to build, are `SendFailed`; transport
/// failures stay `Network` and a revoked token stays `Auth`.
pub(crate) fn send_error(e: serenity::Error) -> GatewayError {
    match e {
        serenity::Error::Model(_) => GatewayError::SendFailed(e.to_string()),
        serenity::Error::Http(ref http) if matches!(http_status(http), Some(s) if s != 401) => {
            GatewayError::SendFailed(e.to_string())
        }
        other => GatewayError::from(other),
    }
}

/// Status code of a failed REST call, if the platform answered at all.
pub(crate) fn http_status(e: &serenity::http::HttpError) -> Option<u16> {
    e.status_code().map(|s| s.as_u16())
}
