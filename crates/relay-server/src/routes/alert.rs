//! Device alert endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use relay_core::AlertPayload;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub status: &'static str,
}

/// Push a heat-stroke warning to the user registered for the device.
///
/// The body is read regardless of content type. Anything that is not a JSON
/// object is treated as an alert without a device id.
pub async fn alert(State(state): State<AppState>, body: Bytes) -> Result<Json<AlertResponse>> {
    let value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("Alert body is not JSON: {}", e);
        Value::Null
    });
    let payload = AlertPayload::from_json(&value);

    state.relay.dispatch_alert(&payload).await?;
    Ok(Json(AlertResponse { status: "success" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{json_body, state_with, unconfigured_state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::{IntoResponse, Response};
    use relay_core::{ChatEvent, RecordingSender, ReplyContext, SentMessage};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::routes::router;

    async fn register(state: &AppState, user_id: &str) {
        for text in ["登録", "Alice", "RoofSite"] {
            state
                .relay
                .handle_chat_event(&ChatEvent::new(user_id, text, ReplyContext::new("t")))
                .await
                .unwrap();
        }
    }

    fn payload(value: serde_json::Value) -> Bytes {
        Bytes::from(value.to_string())
    }

    async fn post_alert(state: AppState, content_type: Option<&str>, body: &'static str) -> Response {
        let mut request = Request::post("/alert");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        router()
            .with_state(state)
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    async fn assert_not_registered(response: Response) {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "status": "error", "message": "User not registered" })
        );
    }

    #[tokio::test]
    async fn test_alert_success() {
        let sender = RecordingSender::new();
        let state = state_with(&sender);
        register(&state, "U1").await;

        let response = alert(
            State(state),
            payload(json!({
                "device_id": "U1",
                "temperature": 33.0,
                "humidity": 75,
                "discomfort_index": 84.5,
                "risk_level": "警戒",
                "duration_minutes": 10
            })),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "success" }));

        let pushes: Vec<_> = sender
            .sent()
            .into_iter()
            .filter(|m| matches!(m, SentMessage::Push { .. }))
            .collect();
        assert_eq!(pushes.len(), 1);
    }

    #[tokio::test]
    async fn test_alert_unknown_device_is_404() {
        let sender = RecordingSender::new();

        let response = alert(State(state_with(&sender)), payload(json!({ "device_id": "U404" })))
            .await
            .into_response();

        assert_not_registered(response).await;
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bodies_keep_error_envelope() {
        let sender = RecordingSender::new();

        for body in ["null", "{bad", "", "[1]", "\"U1\""] {
            let response = post_alert(state_with(&sender), Some("application/json"), body).await;
            assert_not_registered(response).await;
        }
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_alert_without_content_type() {
        let sender = RecordingSender::new();
        let state = state_with(&sender);
        register(&state, "U1").await;

        let response = post_alert(state.clone(), None, r#"{"device_id":"U1"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "success" }));

        let response = post_alert(state, None, "null").await;
        assert_not_registered(response).await;
    }

    #[tokio::test]
    async fn test_positional_array_does_not_reach_registry() {
        let sender = RecordingSender::new();
        let state = state_with(&sender);
        register(&state, "1").await;

        let response = post_alert(state, Some("application/json"), "[1]").await;
        assert_not_registered(response).await;
        assert!(!sender.sent().iter().any(|m| matches!(m, SentMessage::Push { .. })));
    }

    #[tokio::test]
    async fn test_alert_delivery_failure_is_500() {
        let sender = RecordingSender::new();
        let state = state_with(&sender);
        register(&state, "U1").await;

        // Same registry, failing transport.
        let failing = RecordingSender::failing("LINE API error 429: rate limited");
        let state = AppState::new(
            relay_core::Relay::new(
                state.relay.store().clone(),
                relay_core::SendCapability::present(std::sync::Arc::new(failing)),
            ),
            None,
        );

        let response = alert(State(state), payload(json!({ "device_id": "U1" })))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_alert_without_transport_is_500() {
        let response = alert(State(unconfigured_state()), payload(json!({ "device_id": "U1" })))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
