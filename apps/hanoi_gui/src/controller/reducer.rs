//! Window-side mirror of the rods, rebuilt purely from session events.

use hanoi_core::{RodSnapshot, RodState};
use shared::{
    domain::{AppliedMove, EndReason, SessionId, SessionState},
    protocol::SessionEvent,
};

#[derive(Debug, Clone)]
pub struct PlaybackView {
    rods: RodState,
    session: Option<SessionId>,
    state: SessionState,
    last_move: Option<AppliedMove>,
}

impl Default for PlaybackView {
    fn default() -> Self {
        Self {
            rods: RodState::new(),
            session: None,
            state: SessionState::Idle,
            last_move: None,
        }
    }
}

impl PlaybackView {
    /// Folds one event into the view. Events from sessions other than the
    /// current one are ignored, except a `SessionStarted` which replaces it.
    pub fn apply(&mut self, event: &SessionEvent) -> Result<(), String> {
        match event {
            SessionEvent::SessionStarted {
                session,
                disk_count,
                ..
            } => {
                self.rods.reset(*disk_count).map_err(|err| err.to_string())?;
                self.session = Some(*session);
                self.state = SessionState::Running;
                self.last_move = None;
            }
            SessionEvent::MoveApplied { session, applied } if self.is_current(*session) => {
                self.rods
                    .apply_move(applied.from, applied.to)
                    .map_err(|err| format!("window lost track of the rods: {err}"))?;
                self.last_move = Some(*applied);
            }
            SessionEvent::SessionEnded { session, reason } if self.is_current(*session) => {
                self.state = match reason {
                    EndReason::Completed => SessionState::Completed,
                    EndReason::Cancelled => SessionState::Cancelled,
                };
            }
            SessionEvent::SessionFaulted { session, .. } if self.is_current(*session) => {
                self.state = SessionState::Faulted;
            }
            _ => {}
        }
        Ok(())
    }

    fn is_current(&self, session: SessionId) -> bool {
        self.session == Some(session)
    }

    pub fn rods(&self) -> RodSnapshot {
        self.rods.snapshot()
    }

    pub fn disk_count(&self) -> u8 {
        self.rods.disk_count()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn last_move(&self) -> Option<AppliedMove> {
        self.last_move
    }

    pub fn progress(&self) -> (u64, u64) {
        self.last_move
            .map_or((0, shared::domain::minimal_move_count(self.disk_count())), |applied| {
                (applied.move_number, applied.total_moves)
            })
    }
}
