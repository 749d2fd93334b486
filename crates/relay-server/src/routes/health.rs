//! Liveness and health check endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Liveness text.
pub const LIVENESS_TEXT: &str = "涼メ〜ル - 熱中症見守りシステム稼働中";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub chat_api_configured: bool,
    pub user_count: usize,
}

/// Liveness endpoint.
pub async fn home() -> &'static str {
    LIVENESS_TEXT
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        chat_api_configured: state.relay.transport_configured(),
        user_count: state.relay.user_count().await,
    })
}
