//! Handler error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::domain::DomainError;
use crate::views::Outcome;

/// Application-level error type for request handlers.
///
/// Renders the `error` view with the matching status code. Validation
/// failures are not errors: handlers re-render their form instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// A by-identifier lookup found nothing; the message is shown to the user
    #[error("{0}")]
    NotFound(String),

    /// The data store failed
    #[error("Database error: {0}")]
    Database(String),
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound("Not found".to_string()),
            DomainError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let view = Outcome::render(
            "error",
            json!({
                "message": message,
                "error": { "status": status.as_u16() },
            }),
        );

        (status, view).into_response()
    }
}
