use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::relay::{Ack, RelayError, SubmitMessage};
use crate::state::AppState;

/// `POST /send-message`. Answers with `{success}` and nothing else; the
/// reason for a failure only goes to the log.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SubmitMessage>, JsonRejection>,
) -> (StatusCode, Json<Ack>) {
    let result = match payload {
        Ok(Json(body)) => state.relay.submit(body.message.as_deref()).await,
        Err(rejection) => {
            tracing::debug!("rejected relay body: {rejection}");
            Err(RelayError::Validation("malformed body"))
        }
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(Ack { success: true })),
        Err(e) => {
            match &e {
                RelayError::Validation(_) => tracing::debug!("relay submission refused: {e}"),
                RelayError::Gateway(_) => tracing::warn!("relay submission failed: {e}"),
            }
            let status = if state.legacy_status {
                StatusCode::OK
            } else {
                e.status()
            };
            (status, Json(Ack { success: false }))
        }
    }
}
