//! Webhook event types delivered by the LINE platform.

use serde::{Deserialize, Serialize};

/// Body of a webhook request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// User id of the bot that should receive the events.
    #[serde(default)]
    pub destination: Option<String>,

    /// Events, in the order they occurred. May be empty (verification ping).
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event type ("message", "follow", "unfollow", ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Token for answering this event, if it can be answered.
    #[serde(default)]
    pub reply_token: Option<String>,

    /// Who triggered the event.
    #[serde(default)]
    pub source: Option<Source>,

    /// Event time (milliseconds since epoch).
    #[serde(default)]
    pub timestamp: u64,

    /// Message content for "message" events.
    #[serde(default)]
    pub message: Option<EventMessage>,
}

/// Origin of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source type ("user", "group" or "room").
    #[serde(rename = "type")]
    pub kind: String,

    /// Sending user, when known.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Group id for group sources.
    #[serde(default)]
    pub group_id: Option<String>,

    /// Room id for room sources.
    #[serde(default)]
    pub room_id: Option<String>,
}

/// Message carried by a "message" event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    /// Message type ("text", "image", "sticker", ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Message id.
    #[serde(default)]
    pub id: String,

    /// Text content for text messages.
    #[serde(default)]
    pub text: Option<String>,
}

/// A text message from a user, with everything needed to answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessageEvent {
    pub user_id: String,
    pub text: String,
    pub reply_token: String,
}

impl Event {
    /// Extract a user text message from this event.
    ///
    /// Returns `None` for non-message events, non-text messages, events
    /// without a sending user, and events that cannot be replied to.
    pub fn as_text_message(&self) -> Option<TextMessageEvent> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref()?;
        if message.kind != "text" {
            return None;
        }
        Some(TextMessageEvent {
            user_id: self.source.as_ref()?.user_id.clone()?,
            text: message.text.clone()?,
            reply_token: self.reply_token.clone()?,
        })
    }
}
