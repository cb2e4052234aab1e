//! Pre-join hook that runs the access gate before admission handling.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use roomgate_core::events::{HookDecision, JoinRejection, PreJoinEvent};
use roomgate_core::hooks::{PRIORITY_BEFORE_ADMISSION, PreJoinHandler};

use crate::gate::AccessGate;

/// [`PreJoinHandler`] that vetoes joins for rooms the authorization
/// service reports as gone.
///
/// Registered at [`PRIORITY_BEFORE_ADMISSION`] so it runs before the
/// host's default room-join handling.
#[derive(Debug)]
pub struct AccessGateHook {
    /// The gate making the decision.
    gate: Arc<AccessGate>,
    /// Rooms whose name starts with this prefix bypass the check.
    reserved_room_prefix: String,
}

impl AccessGateHook {
    /// Creates the hook over an existing gate.
    pub fn new(gate: Arc<AccessGate>, reserved_room_prefix: impl Into<String>) -> Self {
        Self {
            gate,
            reserved_room_prefix: reserved_room_prefix.into(),
        }
    }
}

#[async_trait]
impl PreJoinHandler for AccessGateHook {
    async fn handle(&self, event: &PreJoinEvent) -> HookDecision {
        let Some(room_name) = event.room_name() else {
            // Malformed addressing: fail open and leave the event alone.
            warn!(
                room_address = %event.room_address,
                participant = %event.participant,
                "Could not extract room name from join event, allowing"
            );
            return HookDecision::Allow;
        };

        if !self.reserved_room_prefix.is_empty()
            && room_name.starts_with(&self.reserved_room_prefix)
        {
            debug!(room = room_name, "Reserved system room, skipping access check");
            return HookDecision::Allow;
        }

        if self.gate.check_room_access(room_name).await {
            HookDecision::Allow
        } else {
            HookDecision::Reject(JoinRejection::meeting_deleted(&event.participant))
        }
    }

    fn name(&self) -> &str {
        "room-access-gate"
    }

    fn priority(&self) -> i32 {
        PRIORITY_BEFORE_ADMISSION
    }
}
