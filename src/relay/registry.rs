use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One connected push client. The socket task owns the receiving half of
/// the outbound queue; dropping it closes the connection for good.
#[derive(Debug, Clone)]
pub struct ClientConnection {
    pub id: String,
    pub connected_at: DateTime<Utc>,
    tx: mpsc::UnboundedSender<String>,
}

impl ClientConnection {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Self {
            id: crate::snowflake::generate(),
            connected_at: Utc::now(),
            tx,
        };
        (conn, rx)
    }

    /// Queues a frame for this client. Returns false if the socket is gone.
    pub fn push(&self, frame: String) -> bool {
        self.tx.send(frame).is_ok()
    }

    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Live push connections, keyed by connection id.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<DashMap<String, ClientConnection>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, conn: ClientConnection) {
        self.clients.insert(conn.id.clone(), conn);
    }

    /// Removes a connection. Unknown or already removed ids are a no-op.
    pub fn unregister(&self, id: &str) -> Option<ClientConnection> {
        self.clients.remove(id).map(|(_, conn)| conn)
    }

    /// Point-in-time copy of the membership. Later changes to the registry
    /// do not affect an iteration over the returned list.
    pub fn snapshot(&self) -> Vec<ClientConnection> {
        self.clients.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
