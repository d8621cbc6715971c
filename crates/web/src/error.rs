use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// The gate converts every policy-path failure into a redirect, so this type
/// only carries handler-infrastructure failures (for example a session
/// cookie that cannot be encoded into a header). Implements
/// [`IntoResponse`] to produce a consistent JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(msg) = &self;
        tracing::error!(error = %msg, "Internal error");

        let body = json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
