mod ai;
mod health;
mod relay;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::relay::socket::ws_upgrade;
use crate::state::AppState;

/// The full API: relay endpoint, push socket, AI proxy and diagnostics.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .route("/status", get(health::status))
        .route("/ws", get(ws_upgrade))
        .route("/send-message", post(relay::send_message))
        .route("/gemini", post(ai::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Push-only router for the dedicated WebSocket listener. Clients may
/// connect at the root or at `/ws`.
pub fn push_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_upgrade))
        .route("/ws", get(ws_upgrade))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
