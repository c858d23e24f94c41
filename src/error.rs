use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::ai::GenerativeError;

/// Errors of the auxiliary HTTP routes. The relay endpoint answers with an
/// `Ack` instead and never uses this type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(String),
    Unavailable(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "invalid_request",
            AppError::Upstream(_) => "upstream_error",
            AppError::Unavailable(_) => "unavailable",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Upstream(e) => {
                tracing::error!("upstream error: {e}");
                "upstream request failed".to_string()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unavailable(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<GenerativeError> for AppError {
    fn from(e: GenerativeError) -> Self {
        AppError::Upstream(e.to_string())
    }
}
