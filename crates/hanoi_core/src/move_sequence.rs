//! Lazy generator for the minimal Tower of Hanoi solution.
//!
//! The classic recursion is unrolled onto an explicit frame stack so the
//! sequence can be consumed one move at a time by a driver that owns pacing
//! and side effects. When a cancellation token is attached it is polled every
//! time a recursive frame is entered; once cancelled the sequence ends and
//! stays ended.

use std::iter::FusedIterator;

use shared::domain::{minimal_move_count, Move, RodIndex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Solve {
        disks: u8,
        from: RodIndex,
        to: RodIndex,
        via: RodIndex,
    },
    Direct(Move),
}

#[derive(Debug)]
pub struct MoveSequence {
    stack: Vec<Frame>,
    cancel: Option<CancellationToken>,
    total: u64,
    emitted: u64,
}

impl MoveSequence {
    /// Moves `disks` disks from `from` to `to` using `via` as the spare rod.
    pub fn new(disks: u8, from: RodIndex, to: RodIndex, via: RodIndex) -> Self {
        Self {
            stack: vec![Frame::Solve {
                disks,
                from,
                to,
                via,
            }],
            cancel: None,
            total: minimal_move_count(disks),
            emitted: 0,
        }
    }

    /// Source to destination via the auxiliary rod.
    pub fn standard(disks: u8) -> Self {
        Self::new(
            disks,
            RodIndex::SOURCE,
            RodIndex::DESTINATION,
            RodIndex::AUXILIARY,
        )
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Length of the full, uncancelled sequence.
    pub fn total_moves(&self) -> u64 {
        self.total
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

impl Iterator for MoveSequence {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Solve { disks: 0, .. } => {}
                Frame::Solve {
                    disks,
                    from,
                    to,
                    via,
                } => {
                    if self.cancelled() {
                        self.stack.clear();
                        return None;
                    }
                    // Pushed in reverse so the left half runs first.
                    self.stack.push(Frame::Solve {
                        disks: disks - 1,
                        from: via,
                        to,
                        via: from,
                    });
                    self.stack.push(Frame::Direct(Move::new(from, to)));
                    self.stack.push(Frame::Solve {
                        disks: disks - 1,
                        from,
                        to: via,
                        via: to,
                    });
                }
                Frame::Direct(mv) => {
                    self.emitted += 1;
                    return Some(mv);
                }
            }
        }
        None
    }
}

impl FusedIterator for MoveSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    const A: RodIndex = RodIndex::SOURCE;
    const B: RodIndex = RodIndex::AUXILIARY;
    const C: RodIndex = RodIndex::DESTINATION;

    #[test]
    fn zero_disks_produce_no_moves() {
        assert_eq!(MoveSequence::standard(0).count(), 0);
    }

    #[test]
    fn one_disk_moves_straight_to_the_destination() {
        let moves: Vec<Move> = MoveSequence::standard(1).collect();
        assert_eq!(moves, vec![Move::new(A, C)]);
    }

    #[test]
    fn two_disks_use_the_auxiliary_rod() {
        let moves: Vec<Move> = MoveSequence::standard(2).collect();
        assert_eq!(moves, vec![Move::new(A, B), Move::new(A, C), Move::new(B, C)]);
    }

    #[test]
    fn three_disks_follow_the_recursive_order() {
        let moves: Vec<Move> = MoveSequence::standard(3).collect();
        assert_eq!(
            moves,
            vec![
                Move::new(A, C),
                Move::new(A, B),
                Move::new(C, B),
                Move::new(A, C),
                Move::new(B, A),
                Move::new(B, C),
                Move::new(A, C),
            ]
        );
    }

    #[test]
    fn move_count_is_minimal_for_every_supported_size() {
        for disks in 1..=12u8 {
            let sequence = MoveSequence::standard(disks);
            let expected = sequence.total_moves();
            assert_eq!(expected, (1u64 << disks) - 1);
            assert_eq!(sequence.count() as u64, expected, "disks={disks}");
        }
    }

    #[test]
    fn honours_custom_rod_roles() {
        let moves: Vec<Move> = MoveSequence::new(2, C, A, B).collect();
        assert_eq!(moves, vec![Move::new(C, B), Move::new(C, A), Move::new(B, A)]);
    }

    #[test]
    fn pre_cancelled_sequence_is_empty() {
        let token = CancellationToken::new();
        token.cancel();
        let mut sequence = MoveSequence::standard(4).with_cancellation(token);
        assert_eq!(sequence.next(), None);
        assert_eq!(sequence.emitted(), 0);
    }

    #[test]
    fn cancellation_stops_at_the_next_frame_entry_and_stays_stopped() {
        let token = CancellationToken::new();
        let mut sequence = MoveSequence::standard(4).with_cancellation(token.clone());

        // 4 disks: the first move is emitted after entering frames 4, 3, 2, 1.
        assert_eq!(sequence.next(), Some(Move::new(A, B)));
        token.cancel();

        // The 2-disk frame was entered before the cancel, so its direct move
        // is still owed; the 1-disk frame after it is never entered.
        let rest: Vec<Move> = sequence.by_ref().collect();
        assert_eq!(rest, vec![Move::new(A, C)]);
        assert_eq!(sequence.next(), None);
    }
}
