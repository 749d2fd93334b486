//! The relay: one registry shared by the registration flow and the dispatcher.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::dispatcher::{AlertDispatcher, Delivery};
use crate::error::RelayError;
use crate::model::{AlertPayload, ChatEvent, StatusAck};
use crate::registration::RegistrationMachine;
use crate::registry::{MemoryRegistry, UserStore};
use crate::sender::SendCapability;
use crate::status;

/// Entry point for every inbound chat event, alert and status ping.
#[derive(Clone)]
pub struct Relay {
    store: Arc<dyn UserStore>,
    transport: SendCapability,
    registration: RegistrationMachine,
    dispatcher: AlertDispatcher,
}

impl Relay {
    /// Create a relay over `store`.
    pub fn new(store: Arc<dyn UserStore>, transport: SendCapability) -> Self {
        Self {
            registration: RegistrationMachine::new(store.clone()),
            dispatcher: AlertDispatcher::new(store.clone(), transport.clone()),
            store,
            transport,
        }
    }

    /// Create a relay with a fresh process-lifetime registry.
    pub fn in_memory(transport: SendCapability) -> Self {
        Self::new(Arc::new(MemoryRegistry::new()), transport)
    }

    /// Handle a chat message and reply to it.
    ///
    /// Fails fast with `TransportUnconfigured` before touching the registry
    /// when no sender is available. Returns the reply text on success.
    pub async fn handle_chat_event(&self, event: &ChatEvent) -> Result<String, RelayError> {
        let sender = self.transport.require()?;

        let reply = self
            .registration
            .process(&event.user_id, &event.text)
            .await;

        if let Err(err) = sender.reply(&event.reply_context, &reply).await {
            warn!(user_id = %event.user_id, error = %err, "Reply failed");
            return Err(err.into());
        }

        Ok(reply)
    }

    /// Push a warning for `alert` to its registered user.
    pub async fn dispatch_alert(&self, alert: &AlertPayload) -> Result<Delivery, RelayError> {
        self.dispatcher.dispatch(alert).await
    }

    /// Accept a status ping.
    pub fn record_status(&self, payload: &Value) -> StatusAck {
        status::record_status(payload)
    }

    /// Number of users with a registration record.
    pub async fn user_count(&self) -> usize {
        self.store.count().await
    }

    /// Whether a chat sender is available.
    pub fn transport_configured(&self) -> bool {
        self.transport.is_configured()
    }

    /// The underlying user store.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }
}
