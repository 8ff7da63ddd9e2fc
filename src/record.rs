//! Move records and the undo log.

use crate::board::Square;
use crate::piece::{Color, Piece};

/// A piece lifted off the board by a capture, with the square it came from.
///
/// In chess that is the destination square; in checkers it is the square
/// jumped over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    pub square: Square,
    pub piece: Piece,
}

/// One applied move, carrying everything needed to reverse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The mover before the move: un-crowned, with its old Demon power.
    pub moved: Piece,
    pub captured: Option<Captured>,
    pub mover: Color,
    /// False for a checkers jump that must be followed by another.
    pub ended_turn: bool,
}

impl MoveRecord {
    pub fn captured_piece(&self) -> Option<&Piece> {
        self.captured.as_ref().map(|c| &c.piece)
    }
}

/// Applied moves, oldest first.
#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    records: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }
}
