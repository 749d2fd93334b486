//! Outbound message sending.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{RelayError, SendError};
use crate::model::ReplyContext;

/// Trait for delivering messages over the chat transport.
///
/// Abstracted so the relay can run against LINE or a test double.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Answer an inbound event.
    ///
    /// # Arguments
    /// * `reply_context` - Token identifying the event being answered
    /// * `text` - Message content
    async fn reply(&self, reply_context: &ReplyContext, text: &str) -> Result<(), SendError>;

    /// Send a message to a user without an inbound event to answer.
    ///
    /// # Arguments
    /// * `user_id` - Platform user id
    /// * `text` - Message content
    async fn push(&self, user_id: &str, text: &str) -> Result<(), SendError>;
}

/// The chat send capability, which may be absent when credentials are missing.
#[derive(Clone, Default)]
pub struct SendCapability {
    sender: Option<Arc<dyn MessageSender>>,
}

impl SendCapability {
    /// A capability backed by `sender`.
    pub fn present(sender: Arc<dyn MessageSender>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// No transport available.
    pub fn absent() -> Self {
        Self { sender: None }
    }

    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }

    /// The sender, or `TransportUnconfigured` if there is none.
    pub fn require(&self) -> Result<&dyn MessageSender, RelayError> {
        self.sender.as_deref().ok_or(RelayError::TransportUnconfigured)
    }
}

impl std::fmt::Debug for SendCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendCapability")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// A message captured by [`RecordingSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Reply { reply_token: String, text: String },
    Push { user_id: String, text: String },
}

/// A sender that records every message, optionally failing each call.
///
/// Intended for tests of code that sits on top of the relay.
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failure: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every call fails with `detail`. Nothing is recorded.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(detail.into()),
        }
    }

    /// Messages delivered so far, in call order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    fn record(&self, message: SentMessage) -> Result<(), SendError> {
        if let Some(detail) = &self.failure {
            return Err(SendError::new(detail.clone()));
        }
        self.sent
            .lock()
            .map_err(|_| SendError::new("recorder poisoned"))?
            .push(message);
        Ok(())
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn reply(&self, reply_context: &ReplyContext, text: &str) -> Result<(), SendError> {
        self.record(SentMessage::Reply {
            reply_token: reply_context.as_str().to_string(),
            text: text.to_string(),
        })
    }

    async fn push(&self, user_id: &str, text: &str) -> Result<(), SendError> {
        self.record(SentMessage::Push {
            user_id: user_id.to_string(),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_capability() {
        let capability = SendCapability::absent();
        assert!(!capability.is_configured());
        assert!(matches!(
            capability.require(),
            Err(RelayError::TransportUnconfigured)
        ));
    }

    #[tokio::test]
    async fn test_recording_sender_keeps_order() {
        let sender = RecordingSender::new();
        sender.push("U1", "first").await.unwrap();
        sender.reply(&ReplyContext::new("tok"), "second").await.unwrap();

        assert_eq!(
            sender.sent(),
            vec![
                SentMessage::Push {
                    user_id: "U1".to_string(),
                    text: "first".to_string()
                },
                SentMessage::Reply {
                    reply_token: "tok".to_string(),
                    text: "second".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_sender() {
        let sender = RecordingSender::failing("boom");
        let err = sender.push("U1", "hi").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(sender.sent().is_empty());
    }
}
