//! LINE Messaging API HTTP client.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LineConfig;
use crate::error::LineError;
use crate::types::{ApiErrorBody, BotInfo, PushRequest, ReplyRequest};

/// Client for the LINE Messaging API.
#[derive(Clone)]
pub struct LineClient {
    http: Client,
    config: LineConfig,
}

impl LineClient {
    /// Create a client. No request is made until a message is sent.
    pub fn new(config: LineConfig) -> Result<Self, LineError> {
        if config.access_token.trim().is_empty() {
            return Err(LineError::Config("channel access token is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(LineError::Http)?;

        Ok(Self { http, config })
    }

    /// Answer a webhook event with a text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        self.reply(&ReplyRequest::text(reply_token, text)).await
    }

    /// Push a text message to a user.
    pub async fn push_text(&self, to: &str, text: &str) -> Result<(), LineError> {
        self.push(&PushRequest::text(to, text)).await
    }

    /// Send a reply request.
    pub async fn reply(&self, request: &ReplyRequest) -> Result<(), LineError> {
        debug!("Reply with {} message(s)", request.messages.len());
        self.post_json(&self.config.reply_url(), request).await?;
        Ok(())
    }

    /// Send a push request.
    pub async fn push(&self, request: &PushRequest) -> Result<(), LineError> {
        debug!(to = %request.to, "Push {} message(s)", request.messages.len());
        self.post_json(&self.config.push_url(), request).await?;
        Ok(())
    }

    /// Fetch the bot's profile.
    pub async fn bot_info(&self) -> Result<BotInfo, LineError> {
        let response = self
            .http
            .get(self.config.bot_info_url())
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(LineError::Http)?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(LineError::Http)
    }

    /// Check that the access token is accepted by the API.
    pub async fn health_check(&self) -> Result<bool, LineError> {
        match self.bot_info().await {
            Ok(info) => {
                info!(bot = %info.user_id, "LINE credentials accepted");
                Ok(true)
            }
            Err(LineError::Api { status, message }) => {
                warn!("LINE credentials rejected ({}): {}", status, message);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Response, LineError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(body)
            .send()
            .await
            .map_err(LineError::Http)?;

        Self::check_status(response).await
    }

    /// Turn a non-success response into `LineError::Api`.
    async fn check_status(response: Response) -> Result<Response, LineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|err| err.describe())
            .unwrap_or(body);

        Err(LineError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("config", &self.config)
            .finish()
    }
}
