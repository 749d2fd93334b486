//! Conversational registration flow.
//!
//! The state of a user is derived from their record on every message and fed
//! through [`next_action`], a fixed transition table:
//!
//! | State            | `登録`  | `状態`              | other text      |
//! |------------------|---------|---------------------|-----------------|
//! | Unregistered     | Start   | ReportUnregistered  | ShowHelp        |
//! | AwaitingName     | Start   | CaptureName         | CaptureName     |
//! | AwaitingLocation | Start   | CaptureLocation     | CaptureLocation |
//! | Complete         | Start   | ReportStatus        | ShowHelp        |
//!
//! The start command wins in every state. While a field is pending, the
//! status literal is stored as that field's value.

use std::sync::Arc;

use tracing::{debug, info};

use crate::messages::{self, REGISTER_COMMAND, STATUS_COMMAND};
use crate::model::UserRecord;
use crate::registry::UserStore;

/// Where a user is in the registration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    AwaitingName,
    AwaitingLocation,
    Complete,
}

impl RegistrationState {
    /// Derive the state from a user's record.
    pub fn of(record: Option<&UserRecord>) -> Self {
        match record {
            None => RegistrationState::Unregistered,
            Some(r) if r.name.is_none() => RegistrationState::AwaitingName,
            Some(r) if r.location.is_none() => RegistrationState::AwaitingLocation,
            Some(_) => RegistrationState::Complete,
        }
    }
}

/// A recognised command literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Register,
    Status,
}

impl Command {
    /// Exact-match the text against the command literals.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            REGISTER_COMMAND => Some(Command::Register),
            STATUS_COMMAND => Some(Command::Status),
            _ => None,
        }
    }
}

/// What to do with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    CaptureName,
    CaptureLocation,
    ReportStatus,
    ReportUnregistered,
    ShowHelp,
}

/// The transition table.
pub fn next_action(state: RegistrationState, text: &str) -> Action {
    use RegistrationState::*;

    match (state, Command::parse(text)) {
        (_, Some(Command::Register)) => Action::Start,
        (AwaitingName, _) => Action::CaptureName,
        (AwaitingLocation, _) => Action::CaptureLocation,
        (Unregistered, Some(Command::Status)) => Action::ReportUnregistered,
        (Complete, Some(Command::Status)) => Action::ReportStatus,
        (Unregistered | Complete, None) => Action::ShowHelp,
    }
}

/// Apply `action` to the current record, returning the replacement if the
/// record changes.
fn apply(action: Action, current: Option<&UserRecord>, text: &str) -> Option<UserRecord> {
    match action {
        Action::Start => Some(UserRecord::start_now()),
        Action::CaptureName => current.cloned().map(|mut record| {
            record.name = Some(text.to_string());
            record
        }),
        Action::CaptureLocation => current.cloned().map(|mut record| {
            record.location = Some(text.to_string());
            record
        }),
        Action::ReportStatus | Action::ReportUnregistered | Action::ShowHelp => None,
    }
}

fn reply_for(action: Action, record: Option<&UserRecord>, text: &str) -> String {
    match (action, record) {
        (Action::Start, _) => messages::NAME_PROMPT.to_string(),
        (Action::CaptureName, _) => messages::location_prompt(text),
        (Action::CaptureLocation, Some(record)) => messages::registration_complete(record),
        (Action::ReportStatus, Some(record)) => messages::status_summary(record),
        (Action::ReportUnregistered, _) => messages::NOT_REGISTERED.to_string(),
        // Capture and status actions are only chosen when a record exists.
        (Action::CaptureLocation | Action::ReportStatus, None) | (Action::ShowHelp, _) => {
            messages::HELP_TEXT.to_string()
        }
    }
}

/// Drives the registration flow against a [`UserStore`].
#[derive(Clone)]
pub struct RegistrationMachine {
    store: Arc<dyn UserStore>,
}

impl RegistrationMachine {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Process one message from `user_id` and return the reply text.
    ///
    /// State derivation, the transition, and the record write happen in a
    /// single store update, so concurrent messages for the same user are
    /// applied one after the other.
    pub async fn process(&self, user_id: &str, text: &str) -> String {
        let mut chosen = Action::ShowHelp;
        let chosen_ref = &mut chosen;

        let record = self
            .store
            .update(
                user_id,
                Box::new(move |current: Option<&UserRecord>| {
                    let action = next_action(RegistrationState::of(current), text);
                    *chosen_ref = action;
                    apply(action, current, text)
                }),
            )
            .await;

        match chosen {
            Action::Start => info!(user_id = %user_id, "Registration started"),
            Action::CaptureLocation => info!(user_id = %user_id, "Registration completed"),
            action => debug!(user_id = %user_id, ?action, "Registration message handled"),
        }

        reply_for(chosen, record.as_ref(), text)
    }
}
