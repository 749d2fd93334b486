//! Data types shared by the registration flow and the alert dispatcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registration state for a single chat user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Worker name, unset until the user provides it.
    pub name: Option<String>,
    /// Work site, unset until the user provides it.
    pub location: Option<String>,
    /// When the registration-start command was received.
    pub registered_at: DateTime<Utc>,
}

impl UserRecord {
    /// A fresh record with both fields unset.
    pub fn started_at(registered_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            location: None,
            registered_at,
        }
    }

    /// A fresh record stamped with the current time.
    pub fn start_now() -> Self {
        Self::started_at(Utc::now())
    }

    /// Whether both name and location have been captured.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.location.is_some()
    }
}

/// Opaque token the transport needs to answer a specific inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplyContext(String);

impl ReplyContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A text message received from a chat user.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    /// Platform-assigned sender id.
    pub user_id: String,
    /// Message text.
    pub text: String,
    /// Where the reply goes.
    pub reply_context: ReplyContext,
}

impl ChatEvent {
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
        reply_context: ReplyContext,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            reply_context,
        }
    }
}

/// Alert posted by a field device.
///
/// Every field is optional and loosely typed: devices are not validated at
/// this layer, and anything missing is rendered as a placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertPayload {
    #[serde(default)]
    pub device_id: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub humidity: Option<Value>,
    #[serde(default)]
    pub discomfort_index: Option<Value>,
    #[serde(default)]
    pub risk_level: Option<Value>,
    #[serde(default)]
    pub duration_minutes: Option<Value>,
}

impl AlertPayload {
    /// Read an alert from an arbitrary JSON body.
    ///
    /// Only objects carry fields. Any other value, arrays included, yields an
    /// empty payload with no device id.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// The registry key for this alert.
    pub fn device_id(&self) -> Option<String> {
        self.device_id.as_ref().and_then(device_key)
    }
}

/// Registry key for a raw `device_id` value.
///
/// Numeric ids are accepted and stringified; anything else has no key.
pub fn device_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Outcome of a status ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAck {
    Received,
}

impl StatusAck {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAck::Received => "received",
        }
    }
}
