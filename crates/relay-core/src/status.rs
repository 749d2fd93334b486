//! Periodic device status pings.

use serde_json::Value;
use tracing::info;

use crate::model::{device_key, StatusAck};

/// Record a status ping. Pings are logged only; any payload is accepted.
pub fn record_status(payload: &Value) -> StatusAck {
    info!(device_id = %device_label(payload), payload = %payload, "Status update");
    StatusAck::Received
}

fn device_label(payload: &Value) -> String {
    payload
        .get("device_id")
        .and_then(device_key)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_any_payload_is_received() {
        for payload in [
            json!({ "device_id": "U1", "temperature": 28.0 }),
            json!({}),
            json!(null),
            json!([1, 2, 3]),
            json!("text"),
        ] {
            assert_eq!(record_status(&payload), StatusAck::Received);
        }
    }

    #[test]
    fn test_device_label_matches_alert_keys() {
        assert_eq!(device_label(&json!({ "device_id": "U1" })), "U1");
        assert_eq!(device_label(&json!({ "device_id": 42 })), "42");
        assert_eq!(device_label(&json!({ "device_id": true })), "-");
        assert_eq!(device_label(&json!([1])), "-");
    }
}
