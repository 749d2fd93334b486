//! Wire types for the LINE Messaging API.

mod send;
mod webhook;

pub use send::*;
pub use webhook::*;
