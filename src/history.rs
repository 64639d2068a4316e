//! Record of applied moves, and a queue that plays moves back one animated
//! turn at a time.
//!
//! Undo is a naive replay of the recorded moves inverted in reverse order.

use std::collections::VecDeque;
use std::time::Duration;

use crate::engine::{RotationEngine, TurnOutcome};
use crate::geometry::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn record(&mut self, turn: Move) {
        self.moves.push(turn);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// The moves that undo the whole history, in the order to apply them.
    pub fn undo_sequence(&self) -> Vec<Move> {
        self.moves.iter().rev().map(|turn| turn.inverse()).collect()
    }

    /// Like [`Self::undo_sequence`], leaving the history empty.
    pub fn take_undo_sequence(&mut self) -> Vec<Move> {
        let undo = self.undo_sequence();
        self.moves.clear();
        undo
    }
}

impl Extend<Move> for MoveHistory {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, iter: T) {
        self.moves.extend(iter);
    }
}

/// Moves waiting to be animated.
#[derive(Debug, Clone, Default)]
pub struct MoveQueue {
    pending: VecDeque<Move>,
    /// Per-turn duration; `None` uses the engine default.
    duration: Option<Duration>,
}

impl MoveQueue {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            duration: Some(duration),
        }
    }

    pub fn push(&mut self, turn: Move) {
        self.pending.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Starts the next queued move if the engine is idle. Returns the move
    /// that started, if any. Moves the engine ignores are skipped.
    pub fn pump(&mut self, engine: &mut RotationEngine) -> Option<Move> {
        if engine.is_busy() {
            return None;
        }
        while let Some(turn) = self.pending.pop_front() {
            match engine.rotate_layer(turn, true, self.duration) {
                TurnOutcome::Started | TurnOutcome::Completed => return Some(turn),
                TurnOutcome::Ignored => continue,
                TurnOutcome::Dropped => {
                    self.pending.push_front(turn);
                    return None;
                }
            }
        }
        None
    }
}

impl Extend<Move> for MoveQueue {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
