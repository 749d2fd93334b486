//! LINE webhook endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use line_client::{verify_signature, WebhookRequest, SIGNATURE_HEADER};
use relay_core::{ChatEvent, RelayError, ReplyContext};
use tracing::{debug, warn};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Verify and process a webhook delivery.
///
/// Events are handled one at a time in delivery order. A failed reply is
/// logged and does not fail the delivery; a missing transport does.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str> {
    let secret = state
        .channel_secret
        .as_deref()
        .ok_or_else(|| ServerError::Misconfigured("LINE_CHANNEL_SECRET is not set".to_string()))?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("missing X-Line-Signature header".to_string()))?;

    if !verify_signature(secret, &body, signature) {
        return Err(ServerError::BadRequest("invalid signature".to_string()));
    }

    let request: WebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("invalid webhook body: {e}")))?;

    for event in &request.events {
        let Some(message) = event.as_text_message() else {
            debug!(kind = %event.kind, "Skipping webhook event");
            continue;
        };

        let chat = ChatEvent::new(
            message.user_id,
            message.text,
            ReplyContext::new(message.reply_token),
        );

        match state.relay.handle_chat_event(&chat).await {
            Ok(_) => {}
            Err(RelayError::TransportUnconfigured) => {
                return Err(RelayError::TransportUnconfigured.into());
            }
            Err(err) => {
                warn!(user_id = %chat.user_id, error = %err, "Chat event not answered");
            }
        }
    }

    Ok("OK")
}
