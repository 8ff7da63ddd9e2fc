//! The 8x8 grid, its starting layouts and move execution.
//!
//! The board exclusively owns every piece standing on it. A captured piece
//! leaves the grid by value and travels in the [`Applied`] result (and from
//! there into a [`MoveRecord`]) until undo puts it back.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::constants::*;
use crate::piece::{Color, Piece, PieceKind};
use crate::record::{Captured, MoveRecord};

/// A cell as `(row, col)`; row 0 is the top of the printed board.
pub type Square = (usize, usize);

/// Whether `sq` lies on the board.
#[inline]
pub fn in_bounds(sq: Square) -> bool {
    sq.0 < N && sq.1 < N
}

/// The square `(dr, dc)` away from `sq`, if it is on the board.
#[inline]
pub fn step(sq: Square, dr: isize, dc: isize) -> Option<Square> {
    let row = sq.0.checked_add_signed(dr)?;
    let col = sq.1.checked_add_signed(dc)?;
    in_bounds((row, col)).then_some((row, col))
}

/// Why a move or selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Illegal move: no piece on that square")]
    EmptySquare,
    #[error("Illegal move: not your piece")]
    NotYourPiece,
    #[error("Illegal move")]
    IllegalMove,
    #[error("Illegal move: that piece has nowhere to go")]
    NoLegalMoves,
    #[error("No piece selected")]
    NoSelection,
    #[error("Capture chain must continue with the same piece")]
    MustContinueCapture,
    #[error("Game is over")]
    GameOver,
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// Which move-execution algorithm the board runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ruleset {
    /// Capture by landing on the enemy; no promotion.
    Chess,
    /// Capture by jumping over the enemy; crowning on the far row.
    Checkers,
}

/// A successfully executed move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    /// The mover as it stood before the move (before any crowning).
    pub moved: Piece,
    pub captured: Option<Captured>,
    pub promoted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; N]; N],
    ruleset: Ruleset,
}

impl Board {
    pub fn empty(ruleset: Ruleset) -> Self {
        Self {
            cells: [[None; N]; N],
            ruleset,
        }
    }

    /// Standard chess starting position.
    pub fn classic() -> Self {
        let mut board = Self::empty(Ruleset::Chess);
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        board.fill_sides(&back, PieceKind::Pawn);
        board
    }

    /// Special variant: Mages replace Queens, Spearmen replace Pawns, and
    /// each side gets a Demon out in the field.
    pub fn special() -> Self {
        let mut board = Self::empty(Ruleset::Chess);
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Mage,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        board.fill_sides(&back, PieceKind::Spearman);
        board.place((4, 6), Piece::new(Color::White, PieceKind::Demon));
        board.place((3, 1), Piece::new(Color::Black, PieceKind::Demon));
        board
    }

    /// Checkers on the dark squares of the three rows nearest each side.
    pub fn checkers() -> Self {
        let mut board = Self::empty(Ruleset::Checkers);
        for row in 0..N {
            for col in 0..N {
                if (row + col) % 2 == 0 {
                    continue;
                }
                if row < CHECKER_ROWS {
                    board.place((row, col), Piece::new(Color::Black, PieceKind::Checker));
                } else if row >= N - CHECKER_ROWS {
                    board.place((row, col), Piece::new(Color::White, PieceKind::Checker));
                }
            }
        }
        board
    }

    fn fill_sides(&mut self, back: &[PieceKind; N], front: PieceKind) {
        for (col, &kind) in back.iter().enumerate() {
            self.place((WHITE_BACK_ROW, col), Piece::new(Color::White, kind));
            self.place((BLACK_BACK_ROW, col), Piece::new(Color::Black, kind));
            self.place((WHITE_PAWN_ROW, col), Piece::new(Color::White, front));
            self.place((BLACK_PAWN_ROW, col), Piece::new(Color::Black, front));
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// The piece on `sq`, or `None` for empty or off-board squares.
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        if !in_bounds(sq) {
            return None;
        }
        self.cells[sq.0][sq.1].as_ref()
    }

    pub fn get_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        if !in_bounds(sq) {
            return None;
        }
        self.cells[sq.0][sq.1].as_mut()
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        in_bounds(sq) && self.cells[sq.0][sq.1].is_none()
    }

    /// Put `piece` on `sq`, returning whatever stood there. Off-board squares
    /// are ignored.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        if !in_bounds(sq) {
            return None;
        }
        self.cells[sq.0][sq.1].replace(piece)
    }

    /// Lift the piece off `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        if !in_bounds(sq) {
            return None;
        }
        self.cells[sq.0][sq.1].take()
    }

    /// Every occupied square with its piece, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|p| ((row, col), p)))
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Destinations of the piece on `from`; empty for an empty or off-board
    /// square.
    pub fn legal_destinations(&self, from: Square, capturing: bool) -> Vec<Square> {
        match self.get(from) {
            Some(piece) => piece.legal_destinations(self, from, capturing),
            None => Vec::new(),
        }
    }

    /// Execute a move after validating it against the mover's rule.
    ///
    /// The move is atomic: on `Err` the board is untouched.
    ///
    /// # Errors
    /// - [`MoveError::EmptySquare`] - nothing stands on `from`
    /// - [`MoveError::IllegalMove`] - the mover's rule refuses `to`
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        capturing: bool,
    ) -> Result<Applied, MoveError> {
        let piece = *self.get(from).ok_or(MoveError::EmptySquare)?;
        if !piece.is_legal_move(self, from, to, capturing) {
            return Err(MoveError::IllegalMove);
        }

        let captured = match self.ruleset {
            Ruleset::Chess => self.take(to).map(|p| Captured { square: to, piece: p }),
            Ruleset::Checkers => self.take_jumped(from, to),
        };
        self.take(from);
        self.place(to, piece);

        let promoted = self.ruleset == Ruleset::Checkers && self.crown(to, piece);
        debug!(?from, ?to, piece = %piece, captured = ?captured.map(|c| c.piece.kind), promoted, "move applied");

        Ok(Applied {
            moved: piece,
            captured,
            promoted,
        })
    }

    /// Remove the piece sitting just before the landing square of a jump.
    fn take_jumped(&mut self, from: Square, to: Square) -> Option<Captured> {
        if from.0.abs_diff(to.0) < 2 {
            return None;
        }
        let dr = if to.0 > from.0 { -1 } else { 1 };
        let dc = if to.1 > from.1 { -1 } else { 1 };
        let over = step(to, dr, dc)?;
        self.take(over).map(|p| Captured { square: over, piece: p })
    }

    /// Swap a checker that reached its far row for a crowned one.
    fn crown(&mut self, sq: Square, piece: Piece) -> bool {
        let far_row = match piece.color {
            Color::White => WHITE_CROWN_ROW,
            Color::Black => BLACK_CROWN_ROW,
        };
        if piece.kind != PieceKind::Checker || sq.0 != far_row {
            return false;
        }
        self.place(sq, Piece::new(piece.color, PieceKind::KingChecker));
        debug!(?sq, color = %piece.color, "checker crowned");
        true
    }

    /// Reverse a recorded move: the mover returns to its origin in its
    /// pre-move form and any captured piece returns to its square.
    pub fn restore(&mut self, record: &MoveRecord) {
        self.take(record.to);
        self.place(record.from, record.moved);
        if let Some(captured) = record.captured {
            self.place(captured.square, captured.piece);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = cell.map_or('.', |p| p.symbol());
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
