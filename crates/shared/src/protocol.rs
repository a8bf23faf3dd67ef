use serde::{Deserialize, Serialize};

use crate::{
    domain::{AppliedMove, EndReason, SessionId},
    error::ErrorCode,
};

/// Everything a presentation layer needs to stay in step with the rods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        session: SessionId,
        disk_count: u8,
        pacing_ms: u64,
    },
    /// Emitted after the rods were mutated and before the pacing delay.
    MoveApplied {
        session: SessionId,
        applied: AppliedMove,
    },
    /// Emitted exactly once for every session that did not fault.
    SessionEnded {
        session: SessionId,
        reason: EndReason,
    },
    SessionFaulted {
        session: SessionId,
        code: ErrorCode,
        detail: String,
    },
}

impl SessionEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::SessionStarted { session, .. }
            | Self::MoveApplied { session, .. }
            | Self::SessionEnded { session, .. }
            | Self::SessionFaulted { session, .. } => *session,
        }
    }
}
