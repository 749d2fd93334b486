//! Periodic device status endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Accept a status ping. Never fails, whatever the body looks like.
pub async fn status(State(state): State<AppState>, body: Bytes) -> Json<StatusResponse> {
    let payload = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let ack = state.relay.record_status(&payload);

    Json(StatusResponse {
        status: ack.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::unconfigured_state;

    #[tokio::test]
    async fn test_status_accepts_anything() {
        for body in [
            &br#"{"device_id":"U1","temperature":27.5,"uptime":3600}"#[..],
            &b"{}"[..],
            &b"not json at all"[..],
            &b""[..],
        ] {
            let Json(response) =
                status(State(unconfigured_state()), Bytes::from_static(body)).await;
            assert_eq!(response.status, "received");
        }
    }
}
