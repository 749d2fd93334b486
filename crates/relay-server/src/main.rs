//! HTTP front end for the heat-stroke alert relay.
//!
//! Receives LINE webhook deliveries for worker registration and alert/status
//! posts from field devices, and sends messages back through LINE.

mod config;
mod error;
mod routes;
mod sender;
mod state;

use std::sync::Arc;

use line_client::{LineClient, LineConfig};
use relay_core::{Relay, SendCapability};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::sender::LineSender;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting relay server");

    // Chat transport is optional; without it every send fails fast
    let transport = match &config.line_access_token {
        Some(token) => {
            let client = LineClient::new(LineConfig::with_base_url(
                &config.line_api_base_url,
                token,
            ))?;
            spawn_credentials_check(client.clone());
            SendCapability::present(Arc::new(LineSender::new(client)))
        }
        None => {
            warn!("LINE_CHANNEL_ACCESS_TOKEN not set; messages will not be sent");
            SendCapability::absent()
        }
    };

    if config.line_channel_secret.is_none() {
        warn!("LINE_CHANNEL_SECRET not set; webhook deliveries will be rejected");
    }

    // Build application state
    let relay = Relay::in_memory(transport);
    let state = AppState::new(relay, config.line_channel_secret.clone());

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Relay server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check the access token in the background so startup is not delayed.
fn spawn_credentials_check(client: LineClient) {
    tokio::spawn(async move {
        match client.health_check().await {
            Ok(true) => {}
            Ok(false) => warn!("LINE rejected the channel access token"),
            Err(e) => warn!("Could not reach the LINE API: {}", e),
        }
    });
}
