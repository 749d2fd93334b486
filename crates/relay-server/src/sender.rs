//! LINE-backed implementation of the relay's message sender.

use line_client::LineClient;
use relay_core::{async_trait, MessageSender, ReplyContext, SendError};

/// Sends relay messages through the LINE Messaging API.
#[derive(Debug, Clone)]
pub struct LineSender {
    client: LineClient,
}

impl LineSender {
    pub fn new(client: LineClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageSender for LineSender {
    async fn reply(&self, reply_context: &ReplyContext, text: &str) -> Result<(), SendError> {
        self.client
            .reply_text(reply_context.as_str(), text)
            .await
            .map_err(|e| SendError::new(e.to_string()))
    }

    async fn push(&self, user_id: &str, text: &str) -> Result<(), SendError> {
        self.client
            .push_text(user_id, text)
            .await
            .map_err(|e| SendError::new(e.to_string()))
    }
}
