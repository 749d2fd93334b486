//! Types for sending messages through the LINE Messaging API.

use serde::{Deserialize, Serialize};

/// A message object. Only text messages are sent by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { text: String },
}

impl Message {
    /// Create a text message.
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text { text: text.into() }
    }
}

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    /// Token from the webhook event being answered.
    pub reply_token: String,
    /// Messages to send (at most five).
    pub messages: Vec<Message>,
}

impl ReplyRequest {
    /// Create a reply carrying a single text message.
    pub fn text(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages: vec![Message::text(text)],
        }
    }
}

/// Body of `POST /v2/bot/message/push`.
#[derive(Debug, Clone, Serialize)]
pub struct PushRequest {
    /// Recipient user, group or room id.
    pub to: String,
    /// Messages to send (at most five).
    pub messages: Vec<Message>,
}

impl PushRequest {
    /// Create a push carrying a single text message.
    pub fn text(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            messages: vec![Message::text(text)],
        }
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Summary of the error.
    #[serde(default)]
    pub message: String,

    /// Per-field details, if any.
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

impl ApiErrorBody {
    /// Flatten the summary and details into one line.
    pub fn describe(&self) -> String {
        if self.details.is_empty() {
            return self.message.clone();
        }
        let details: Vec<String> = self
            .details
            .iter()
            .map(|d| format!("{}: {}", d.property, d.message))
            .collect();
        format!("{} ({})", self.message, details.join(", "))
    }
}

/// One entry of [`ApiErrorBody::details`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub property: String,
}

/// Bot profile returned by `GET /v2/bot/info`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotInfo {
    /// The bot's user id.
    pub user_id: String,

    /// The bot's basic id (e.g., "@216ru...").
    #[serde(default)]
    pub basic_id: Option<String>,

    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}
