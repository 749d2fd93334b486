//! Application state shared across handlers.

use std::sync::Arc;

use relay_core::Relay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration flow, alert dispatch and the user registry.
    pub relay: Relay,
    /// Secret for verifying webhook signatures.
    pub channel_secret: Option<Arc<str>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(relay: Relay, channel_secret: Option<String>) -> Self {
        Self {
            relay,
            channel_secret: channel_secret.map(Arc::from),
        }
    }
}
