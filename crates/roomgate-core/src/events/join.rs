//! Pre-join event and rejection types.
//!
//! The host conferencing server delivers a [`PreJoinEvent`] for every
//! participant about to enter a room. A handler answers with a
//! [`HookDecision`]: either let normal admission continue, or veto the
//! join with a [`JoinRejection`] stanza description addressed back to the
//! joining participant.

use serde::{Deserialize, Serialize};

/// A "participant about to join room" event from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreJoinEvent {
    /// Full room address, e.g. `weekly-standup@conference.example.com`.
    pub room_address: String,
    /// Address of the joining participant.
    pub participant: String,
    /// Nickname the participant requested inside the room, if any.
    pub nickname: Option<String>,
}

impl PreJoinEvent {
    /// Creates a new pre-join event.
    pub fn new(room_address: impl Into<String>, participant: impl Into<String>) -> Self {
        Self {
            room_address: room_address.into(),
            participant: participant.into(),
            nickname: None,
        }
    }

    /// Sets the requested nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Extracts the bare room name: the portion of the room address before
    /// the first `@`. Returns `None` when the address has no local part.
    pub fn room_name(&self) -> Option<&str> {
        let local = match self.room_address.split_once('@') {
            Some((local, _domain)) => local,
            None => self.room_address.as_str(),
        };
        if local.is_empty() { None } else { Some(local) }
    }
}

/// Error stanza description produced when a join is vetoed.
///
/// Mirrors the cancel/not-allowed error the host sends on the wire; the
/// gate only describes it, the host serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRejection {
    /// Address the error is sent to (the joining participant).
    pub to: String,
    /// Stanza error type, always `cancel` for access denials.
    pub error_type: String,
    /// Defined error condition, always `not-allowed` for access denials.
    pub condition: String,
    /// Human-readable reason shown to the participant.
    pub text: String,
}

impl JoinRejection {
    /// The rejection sent when the authorization service reports the
    /// meeting no longer exists.
    pub fn meeting_deleted(participant: impl Into<String>) -> Self {
        Self {
            to: participant.into(),
            error_type: "cancel".to_string(),
            condition: "not-allowed".to_string(),
            text: "meeting has been deleted".to_string(),
        }
    }
}

/// Outcome of a pre-join handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookDecision {
    /// Let normal admission handling continue.
    Allow,
    /// Veto the join: send the rejection to the participant and stop
    /// further processing of the event.
    Reject(JoinRejection),
}

impl HookDecision {
    /// Returns whether this decision stops further event processing.
    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject(_))
    }
}
