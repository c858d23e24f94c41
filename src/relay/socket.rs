use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::time::Instant;

use crate::state::AppState;

use super::registry::ClientConnection;

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drains the connection's outbound queue into the socket until either side
/// goes away. Client frames are ignored; submissions go through REST.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    let (conn, mut rx) = ClientConnection::new();
    let conn_id = conn.id.clone();
    let connected_at = conn.connected_at;
    state.registry.register(conn);
    tracing::info!(
        "client {conn_id} connected ({} online)",
        state.registry.len()
    );

    let heartbeat = state.heartbeat;
    let mut ping_interval = tokio::time::interval(heartbeat.interval);
    // The first tick fires immediately.
    ping_interval.tick().await;
    let mut last_seen = Instant::now();

    loop {
        tokio::select! {
            frame = rx.recv() => {
                match frame {
                    Some(frame) => {
                        if ws_sink.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    // Dropped from the registry by someone else.
                    None => break,
                }
            }
            _ = ping_interval.tick() => {
                if heartbeat.is_expired(last_seen.elapsed()) {
                    tracing::info!("client {conn_id} missed its heartbeat, closing");
                    break;
                }
                if ws_sink.send(Message::Ping(Vec::<u8>::new().into())).await.is_err() {
                    break;
                }
            }
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Pongs and ignored client frames both prove liveness.
                    Some(Ok(_)) => last_seen = Instant::now(),
                }
            }
        }
    }

    // Closing the receiver first makes any in-flight broadcast see this
    // client as unreachable.
    drop(rx);
    state.registry.unregister(&conn_id);
    let _ = ws_sink.close().await;

    let secs = (Utc::now() - connected_at).num_seconds();
    tracing::info!(
        "client {conn_id} disconnected after {secs}s ({} online)",
        state.registry.len()
    );
}
