//! Configuration types for line-client.

/// Default origin of the LINE Messaging API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

/// Configuration for talking to the LINE Messaging API.
#[derive(Clone)]
pub struct LineConfig {
    /// API origin (e.g., "https://api.line.me").
    pub base_url: String,
    /// Channel access token sent as a bearer token.
    pub access_token: String,
}

impl LineConfig {
    /// Create a configuration for the public API with the given token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, access_token)
    }

    /// Create a configuration against a specific API origin.
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Get the reply endpoint URL.
    pub fn reply_url(&self) -> String {
        format!("{}/v2/bot/message/reply", self.base_url)
    }

    /// Get the push endpoint URL.
    pub fn push_url(&self) -> String {
        format!("{}/v2/bot/message/push", self.base_url)
    }

    /// Get the bot info endpoint URL, used as a credentials check.
    pub fn bot_info_url(&self) -> String {
        format!("{}/v2/bot/info", self.base_url)
    }
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
