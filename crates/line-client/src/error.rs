//! Error types for line-client.

use thiserror::Error;

/// Errors that can occur when talking to the LINE Messaging API.
#[derive(Debug, Error)]
pub enum LineError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("LINE API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
