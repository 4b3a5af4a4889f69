use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinedex_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for catalog errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A catalog error from `cinedex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Client input errors ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::Core(err @ CoreError::Decode { .. }) => {
                (StatusCode::BAD_REQUEST, "DECODE_ERROR", err.to_string())
            }
            AppError::Core(err @ CoreError::FilterParse { .. }) => {
                (StatusCode::BAD_REQUEST, "FILTER_PARSE_ERROR", err.to_string())
            }

            // --- Server-side catalog errors ---
            AppError::Core(CoreError::Store(err)) => {
                tracing::error!(error = %err, "Store execution error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "The catalog query could not be executed".to_string(),
                )
            }
            AppError::Core(err @ CoreError::Mapping { .. }) => {
                tracing::error!(error = %err, "Row mapping error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAPPING_ERROR",
                    "A catalog record could not be read".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
