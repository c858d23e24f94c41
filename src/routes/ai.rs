use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
}

/// `POST /gemini`. Returns the upstream response verbatim.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!("rejected /gemini body: {e}");
        AppError::BadRequest("invalid request body".to_string())
    })?;

    let client = state
        .gemini
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("generative proxy is not configured".to_string()))?;

    let response = client.generate(&body.prompt).await?;
    Ok(Json(response))
}
