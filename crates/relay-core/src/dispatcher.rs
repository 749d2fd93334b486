//! Alert dispatch to registered users.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::messages;
use crate::model::AlertPayload;
use crate::registry::UserStore;
use crate::sender::SendCapability;

/// A successfully pushed alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// User the alert was pushed to.
    pub recipient: String,
    /// The composed message text.
    pub text: String,
}

/// Resolves device alerts to registered users and pushes the warning.
///
/// Only reads the registry.
#[derive(Clone)]
pub struct AlertDispatcher {
    store: Arc<dyn UserStore>,
    transport: SendCapability,
}

impl AlertDispatcher {
    pub fn new(store: Arc<dyn UserStore>, transport: SendCapability) -> Self {
        Self { store, transport }
    }

    /// Dispatch one alert.
    ///
    /// The device id is the user id. A single push is attempted; failures are
    /// reported, never retried.
    pub async fn dispatch(&self, alert: &AlertPayload) -> Result<Delivery, RelayError> {
        let sender = self.transport.require()?;

        let Some(device_id) = alert.device_id() else {
            warn!("Alert without a usable device_id");
            return Err(RelayError::RecipientNotFound("<missing>".to_string()));
        };

        // Snapshot taken here; the send below runs without the registry lock.
        let Some(recipient) = self.store.get(&device_id).await else {
            warn!(device_id = %device_id, "Alert for unregistered device");
            return Err(RelayError::RecipientNotFound(device_id));
        };

        let text = messages::alert_message(&recipient, alert);

        match sender.push(&device_id, &text).await {
            Ok(()) => {
                info!(recipient = %device_id, "Alert delivered");
                Ok(Delivery {
                    recipient: device_id,
                    text,
                })
            }
            Err(err) => {
                error!(recipient = %device_id, error = %err, "Alert delivery failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserRecord;
    use crate::registry::MemoryRegistry;
    use crate::sender::{RecordingSender, SentMessage};
    use serde_json::json;

    async fn registered_store() -> Arc<MemoryRegistry> {
        let registry = Arc::new(MemoryRegistry::new());
        let mut record = UserRecord::start_now();
        record.name = Some("Alice".to_string());
        record.location = Some("RoofSite".to_string());
        registry.upsert("U1", record).await;
        registry
    }

    fn full_alert(device_id: &str) -> AlertPayload {
        serde_json::from_value(json!({
            "device_id": device_id,
            "temperature": 34.1,
            "humidity": 68,
            "discomfort_index": 86.2,
            "risk_level": "HIGH",
            "duration_minutes": 15
        }))
        .unwrap()
    }

    fn dispatcher(store: Arc<MemoryRegistry>, sender: &RecordingSender) -> AlertDispatcher {
        AlertDispatcher::new(store, SendCapability::present(Arc::new(sender.clone())))
    }

    #[tokio::test]
    async fn test_dispatch_to_registered_user() {
        let sender = RecordingSender::new();
        let dispatcher = dispatcher(registered_store().await, &sender);

        let delivery = dispatcher.dispatch(&full_alert("U1")).await.unwrap();

        assert_eq!(delivery.recipient, "U1");
        for expected in ["Alice", "RoofSite", "34.1", "68", "86.2", "HIGH", "15"] {
            assert!(delivery.text.contains(expected), "missing {expected}");
        }
        assert_eq!(
            sender.sent(),
            vec![SentMessage::Push {
                user_id: "U1".to_string(),
                text: delivery.text
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_device_sends_nothing() {
        let sender = RecordingSender::new();
        let dispatcher = dispatcher(registered_store().await, &sender);

        let err = dispatcher.dispatch(&full_alert("U404")).await.unwrap_err();

        assert!(matches!(err, RelayError::RecipientNotFound(ref id) if id == "U404"));
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_device_id_is_not_found() {
        let sender = RecordingSender::new();
        let dispatcher = dispatcher(registered_store().await, &sender);

        let err = dispatcher.dispatch(&AlertPayload::default()).await.unwrap_err();

        assert!(matches!(err, RelayError::RecipientNotFound(_)));
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_risk_level_uses_placeholder() {
        let sender = RecordingSender::new();
        let dispatcher = dispatcher(registered_store().await, &sender);
        let mut alert = full_alert("U1");
        alert.risk_level = None;

        let delivery = dispatcher.dispatch(&alert).await.unwrap();

        assert!(delivery
            .text
            .contains(&format!("リスクレベル: {}", messages::MISSING_VALUE)));
    }

    #[tokio::test]
    async fn test_repeated_alert_is_not_deduplicated() {
        let sender = RecordingSender::new();
        let dispatcher = dispatcher(registered_store().await, &sender);
        let alert = full_alert("U1");

        dispatcher.dispatch(&alert).await.unwrap();
        dispatcher.dispatch(&alert).await.unwrap();

        assert_eq!(sender.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_is_delivery_failed() {
        let sender = RecordingSender::failing("LINE API returned 500");
        let dispatcher = dispatcher(registered_store().await, &sender);

        let err = dispatcher.dispatch(&full_alert("U1")).await.unwrap_err();

        match err {
            RelayError::DeliveryFailed(detail) => assert!(detail.contains("500")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_transport_fails_fast() {
        let dispatcher = AlertDispatcher::new(registered_store().await, SendCapability::absent());

        let err = dispatcher.dispatch(&full_alert("U1")).await.unwrap_err();

        assert!(matches!(err, RelayError::TransportUnconfigured));
    }

    #[tokio::test]
    async fn test_dispatch_does_not_modify_registry() {
        let store = registered_store().await;
        let before = store.get("U1").await;
        let sender = RecordingSender::new();

        dispatcher(store.clone(), &sender)
            .dispatch(&full_alert("U1"))
            .await
            .unwrap();

        assert_eq!(store.get("U1").await, before);
        assert_eq!(store.count().await, 1);
    }
}
