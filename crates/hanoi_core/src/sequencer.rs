//! Playback driver: applies each generated move, reports it, then waits out
//! the pacing delay.

use std::sync::Arc;

use shared::{
    domain::{AppliedMove, EndReason, Move, SessionId},
    error::HanoiError,
    protocol::SessionEvent,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{move_sequence::MoveSequence, pacing::Pacing, rod_state::RodState, SessionObserver};

pub struct Sequencer {
    session: SessionId,
    disk_count: u8,
    rods: Arc<Mutex<RodState>>,
    pacing: Pacing,
    observer: Arc<dyn SessionObserver>,
    cancel: CancellationToken,
}

impl Sequencer {
    /// `rods` must already hold `disk_count` disks on the source rod.
    pub fn new(
        session: SessionId,
        disk_count: u8,
        rods: Arc<Mutex<RodState>>,
        pacing: Pacing,
        observer: Arc<dyn SessionObserver>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            session,
            disk_count,
            rods,
            pacing,
            observer,
            cancel,
        }
    }

    /// Runs the session to its end and reports the outcome to the observer.
    ///
    /// `SessionEnded` is emitted for completion and cancellation,
    /// `SessionFaulted` for a defect; never both.
    pub async fn play(self) -> Result<EndReason, HanoiError> {
        let session = self.session;
        let observer = Arc::clone(&self.observer);

        let outcome = self.run().await;
        match &outcome {
            Ok(reason) => {
                info!(%session, ?reason, "hanoi session ended");
                observer
                    .on_event(SessionEvent::SessionEnded {
                        session,
                        reason: *reason,
                    })
                    .await;
            }
            Err(err) => {
                error!(%session, error = %err, "hanoi session aborted on invariant violation");
                observer
                    .on_event(SessionEvent::SessionFaulted {
                        session,
                        code: err.code(),
                        detail: err.to_string(),
                    })
                    .await;
            }
        }
        outcome
    }

    async fn run(&self) -> Result<EndReason, HanoiError> {
        let mut moves =
            MoveSequence::standard(self.disk_count).with_cancellation(self.cancel.clone());
        let total_moves = moves.total_moves();

        while let Some(mv) = moves.next() {
            if self.cancel.is_cancelled() {
                debug!(session = %self.session, applied = moves.emitted() - 1, "cancellation observed before move");
                return Ok(EndReason::Cancelled);
            }

            let applied = self.apply(mv, moves.emitted(), total_moves).await?;
            self.observer
                .on_event(SessionEvent::MoveApplied {
                    session: self.session,
                    applied,
                })
                .await;

            let delay = self.pacing.current();
            tokio::time::sleep(delay).await;
        }

        if moves.emitted() == total_moves {
            Ok(EndReason::Completed)
        } else {
            debug!(session = %self.session, applied = moves.emitted(), "cancellation observed at frame entry");
            Ok(EndReason::Cancelled)
        }
    }

    async fn apply(
        &self,
        mv: Move,
        move_number: u64,
        total_moves: u64,
    ) -> Result<AppliedMove, HanoiError> {
        let mut rods = self.rods.lock().await;
        let disk = rods.apply_move(mv.from, mv.to)?;
        if cfg!(debug_assertions) {
            rods.verify()?;
        }
        drop(rods);

        debug!(
            session = %self.session,
            move_number,
            total_moves,
            from = %mv.from,
            to = %mv.to,
            disk = disk.rank(),
            "applied move"
        );
        Ok(AppliedMove {
            move_number,
            total_moves,
            from: mv.from,
            to: mv.to,
            disk_rank: disk.rank(),
        })
    }
}

#[cfg(test)]
#[path = "tests/sequencer_tests.rs"]
mod tests;
