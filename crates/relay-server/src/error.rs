//! Error types for the relay HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::RelayError;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Relay operation failed.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The request could not be accepted.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A required setting is missing.
    #[error("Server misconfigured: {0}")]
    Misconfigured(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Relay(RelayError::RecipientNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Relay(_) | ServerError::Misconfigured(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ServerError::Relay(RelayError::RecipientNotFound(_)) => {
                "User not registered".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = serde_json::json!({
            "status": "error",
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, ServerError>;
