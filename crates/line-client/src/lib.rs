//! LINE Messaging API client library.
//!
//! This crate provides a small Rust client for the LINE Messaging API. It
//! supports:
//!
//! - Replying to webhook events and pushing messages to users
//! - Parsing webhook request bodies
//! - Verifying the `X-Line-Signature` header
//!
//! # Example
//!
//! ```no_run
//! use line_client::{LineClient, LineConfig};
//!
//! # async fn example() -> Result<(), line_client::LineError> {
//! let client = LineClient::new(LineConfig::new("channel-access-token"))?;
//!
//! // Push a message
//! client.push_text("U4af4980629", "Hello!").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod signature;
pub mod types;

pub use client::LineClient;
pub use config::{LineConfig, DEFAULT_API_BASE_URL};
pub use error::LineError;
pub use signature::{sign, verify_signature, SIGNATURE_HEADER};
pub use types::*;
