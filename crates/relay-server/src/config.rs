//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use line_client::DEFAULT_API_BASE_URL;

/// Relay server configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// LINE channel access token. Without it no message can be sent.
    pub line_access_token: Option<String>,
    /// LINE channel secret, used to verify webhook signatures.
    pub line_channel_secret: Option<String>,
    /// LINE API origin.
    pub line_api_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `RELAY_ADDR` | Server bind address, overrides `PORT` | - |
    /// | `PORT` | Port bound on all interfaces | `5000` |
    /// | `LINE_CHANNEL_ACCESS_TOKEN` | Messaging API token | (unset: sending disabled) |
    /// | `LINE_CHANNEL_SECRET` | Webhook signing secret | (unset: webhook disabled) |
    /// | `LINE_API_BASE_URL` | Messaging API origin | `https://api.line.me` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match var("RELAY_ADDR") {
            Some(addr) => addr.parse().map_err(|_| ConfigError::InvalidAddr)?,
            None => {
                let port: u16 = var("PORT")
                    .unwrap_or_else(|| "5000".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        Ok(Self {
            addr,
            line_access_token: var("LINE_CHANNEL_ACCESS_TOKEN"),
            line_channel_secret: var("LINE_CHANNEL_SECRET"),
            line_api_base_url: var("LINE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("line_access_token", &self.line_access_token.is_some())
            .field("line_channel_secret", &self.line_channel_secret.is_some())
            .field("line_api_base_url", &self.line_api_base_url)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RELAY_ADDR format")]
    InvalidAddr,

    #[error("Invalid PORT value")]
    InvalidPort,
}
