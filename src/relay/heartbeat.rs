use std::time::Duration;

/// How often idle push sockets are pinged to detect dead peers.
pub const PING_INTERVAL: Duration = Duration::from_secs(30);

/// A socket that has sent nothing (not even a pong) for this long is closed.
pub const PING_TIMEOUT: Duration = Duration::from_secs(90);

/// Keepalive timings for push sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self {
            interval: PING_INTERVAL,
            timeout: PING_TIMEOUT,
        }
    }
}

impl Heartbeat {
    /// Whether a peer last heard from `silent_for` ago should be dropped.
    pub fn is_expired(&self, silent_for: Duration) -> bool {
        silent_for > self.timeout
    }
}
