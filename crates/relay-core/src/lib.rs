//! Core logic for the heat-stroke alert relay.
//!
//! Field devices post alerts; workers register over chat. This crate holds
//! everything between those two inputs and the chat transport:
//!
//! - [`RegistrationMachine`] - the per-user registration conversation
//! - [`AlertDispatcher`] - resolves an alert to a user and pushes the warning
//! - [`UserStore`] / [`MemoryRegistry`] - the shared user registry
//! - [`MessageSender`] / [`SendCapability`] - the outbound transport seam
//! - [`Relay`] - ties the above together for the HTTP layer
//!
//! # Flow
//!
//! ```text
//! chat event ──► RegistrationMachine ──► reply text ──► MessageSender::reply
//!                       │
//!                   UserStore
//!                       │
//! alert ───────► AlertDispatcher ──► warning text ──► MessageSender::push
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use relay_core::{ChatEvent, RecordingSender, Relay, ReplyContext, SendCapability};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), relay_core::RelayError> {
//! let sender = RecordingSender::new();
//! let relay = Relay::in_memory(SendCapability::present(Arc::new(sender.clone())));
//!
//! let event = ChatEvent::new("U123", "登録", ReplyContext::new("reply-token"));
//! let reply = relay.handle_chat_event(&event).await?;
//! assert!(reply.contains("お名前"));
//! # Ok(())
//! # }
//! ```

mod dispatcher;
mod error;
mod model;
mod registration;
mod registry;
mod relay;
mod sender;
mod status;

pub mod messages;

pub use dispatcher::{AlertDispatcher, Delivery};
pub use error::{RelayError, SendError};
pub use model::{AlertPayload, ChatEvent, ReplyContext, StatusAck, UserRecord};
pub use registration::{next_action, Action, Command, RegistrationMachine, RegistrationState};
pub use registry::{MemoryRegistry, RecordUpdate, UserStore};
pub use relay::Relay;
pub use sender::{MessageSender, RecordingSender, SendCapability, SentMessage};
pub use status::record_status;

// Re-export async_trait for sender implementations
pub use async_trait::async_trait;
