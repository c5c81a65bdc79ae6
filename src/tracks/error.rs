use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for track operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("Track not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for TrackError {
    fn from(errors: validator::ValidationErrors) -> Self {
        TrackError::ValidationError(errors.to_string())
    }
}

impl From<JsonRejection> for TrackError {
    fn from(rejection: JsonRejection) -> Self {
        TrackError::ValidationError(rejection.body_text())
    }
}

impl IntoResponse for TrackError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            TrackError::NotFound => (StatusCode::NOT_FOUND, "Track not found".to_string()),
            TrackError::ValidationError(msg) => {
                tracing::debug!("Track validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
