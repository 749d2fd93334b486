//! Route handlers for the relay server.

pub mod alert;
pub mod health;
pub mod status;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Liveness and health
        .route("/", get(health::home))
        .route("/health", get(health::health))
        // LINE webhook
        .route("/webhook", post(webhook::webhook))
        // Device endpoints
        .route("/alert", post(alert::alert))
        .route("/status", post(status::status))
}
