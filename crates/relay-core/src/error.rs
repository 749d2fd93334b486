//! Error types for relay operations.

use thiserror::Error;

/// Errors surfaced by the relay's public operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No registered user matches the alert's device id.
    #[error("recipient not found: {0}")]
    RecipientNotFound(String),

    /// The chat transport rejected or failed to deliver a message.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// The chat send capability is not available (missing credentials).
    #[error("chat transport is not configured")]
    TransportUnconfigured,
}

/// Error reported by a [`MessageSender`](crate::MessageSender) implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SendError(pub String);

impl SendError {
    /// Create a send error from any displayable detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

impl From<SendError> for RelayError {
    fn from(err: SendError) -> Self {
        RelayError::DeliveryFailed(err.0)
    }
}
