use arc_swap::ArcSwapOption;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Connection state of the platform session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Disconnected,
    Connecting,
    Ready,
}

/// Observable state of the single gateway session. Written only by the
/// session manager; everyone else reads.
#[derive(Clone)]
pub struct SessionTracker {
    state: Arc<watch::Sender<SessionState>>,
    identity: Arc<ArcSwapOption<String>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::Disconnected);
        Self {
            state: Arc::new(tx),
            identity: Arc::new(ArcSwapOption::empty()),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn set_state(&self, state: SessionState) {
        let prev = self.state.send_replace(state);
        if prev != state {
            tracing::debug!("gateway session {:?} -> {:?}", prev, state);
        }
        if state == SessionState::Disconnected {
            self.identity.store(None);
        }
    }

    /// The authenticated bot identity, set once the session is Ready.
    pub fn identity(&self) -> Option<String> {
        self.identity.load_full().map(|id| id.as_ref().clone())
    }

    pub fn set_identity(&self, identity: String) {
        self.identity.store(Some(Arc::new(identity)));
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disconnected() {
        let tracker = SessionTracker::new();
        assert_eq!(tracker.state(), SessionState::Disconnected);
        assert!(tracker.identity().is_none());
    }

    #[test]
    fn test_disconnect_clears_identity() {
        let tracker = SessionTracker::new();
        tracker.set_state(SessionState::Connecting);
        tracker.set_identity("relay#0001".to_string());
        tracker.set_state(SessionState::Ready);
        assert_eq!(tracker.identity().as_deref(), Some("relay#0001"));

        tracker.set_state(SessionState::Disconnected);
        assert!(tracker.identity().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_ready() {
        let tracker = SessionTracker::new();
        let mut rx = tracker.subscribe();
        let writer = tracker.clone();
        tokio::spawn(async move {
            writer.set_state(SessionState::Connecting);
            writer.set_state(SessionState::Ready);
        });
        rx.wait_for(|s| *s == SessionState::Ready).await.unwrap();
        assert_eq!(tracker.state(), SessionState::Ready);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_value(SessionState::Ready).unwrap();
        assert_eq!(json, "ready");
    }
}
