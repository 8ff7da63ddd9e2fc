//! Per-kind movement rules.
//!
//! Each piece kind has a unit type implementing [`Movement`]. The kind tag on
//! a [`Piece`] selects its rule through [`rule`], an explicit dispatch table,
//! so a Demon's borrowed power is resolved afresh on every query.
//!
//! Destination lists never contain off-board squares. An off-board or empty
//! origin yields an empty list; illegal moves are reported as `false`, never
//! as a panic.

use crate::board::{Board, Square, in_bounds, step};
use crate::constants::{BLACK_PAWN_ROW, WHITE_PAWN_ROW};
use crate::piece::{Color, Piece, PieceKind};

const ROOK_DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Movement pattern of one piece kind.
pub trait Movement {
    /// Squares `piece` standing on `from` may move to.
    ///
    /// `capturing` is set while a checkers capture chain is in progress;
    /// chess rules ignore it.
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, capturing: bool)
    -> Vec<Square>;

    /// Whether moving `piece` from `from` to `to` is allowed.
    ///
    /// The shared chess check: `to` is on the board, does not hold a piece
    /// of the mover's color, and is one of [`Movement::destinations`].
    fn is_legal_move(
        &self,
        board: &Board,
        from: Square,
        to: Square,
        piece: &Piece,
        capturing: bool,
    ) -> bool {
        if !in_bounds(to) || board.color_at(to) == Some(piece.color) {
            return false;
        }
        self.destinations(board, from, piece, capturing).contains(&to)
    }

    /// True for pieces whose destination is rolled by the controller rather
    /// than chosen by the player.
    fn moves_randomly(&self) -> bool {
        false
    }
}

/// Dispatch table from kind tag to rule.
pub fn rule(kind: PieceKind) -> &'static dyn Movement {
    match kind {
        PieceKind::Pawn => &Pawn,
        PieceKind::Rook => &Rook,
        PieceKind::Knight => &Knight,
        PieceKind::Bishop => &Bishop,
        PieceKind::Queen => &Queen,
        PieceKind::King => &King,
        PieceKind::Mage => &Mage,
        PieceKind::Spearman => &Spearman,
        PieceKind::Demon => &Demon,
        PieceKind::Checker => &Checker,
        PieceKind::KingChecker => &KingChecker,
    }
}

impl Piece {
    pub fn legal_destinations(&self, board: &Board, from: Square, capturing: bool) -> Vec<Square> {
        if !in_bounds(from) {
            return Vec::new();
        }
        rule(self.kind).destinations(board, from, self, capturing)
    }

    pub fn is_legal_move(&self, board: &Board, from: Square, to: Square, capturing: bool) -> bool {
        in_bounds(from) && rule(self.kind).is_legal_move(board, from, to, self, capturing)
    }

    pub fn moves_randomly(&self) -> bool {
        rule(self.kind).moves_randomly()
    }
}

/// Walk each direction until the edge or the first occupied square, which is
/// included only when it holds an enemy.
fn slide(board: &Board, from: Square, color: Color, dirs: &[(isize, isize)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(next) = step(cur, dr, dc) {
            match board.color_at(next) {
                None => moves.push(next),
                Some(c) => {
                    if c != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            cur = next;
        }
    }
    moves
}

/// Fixed offsets, each admissible when on the board and not holding a
/// friendly piece.
fn leap(board: &Board, from: Square, color: Color, offsets: &[(isize, isize)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| step(from, dr, dc))
        .filter(|&sq| board.color_at(sq) != Some(color))
        .collect()
}

// =============================================================================
// Chess
// =============================================================================

pub struct Pawn;

impl Movement for Pawn {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        let mut moves = Vec::new();
        let dir = piece.color.forward();
        let home = match piece.color {
            Color::White => WHITE_PAWN_ROW,
            Color::Black => BLACK_PAWN_ROW,
        };

        if let Some(one) = step(from, dir, 0).filter(|&sq| board.is_empty(sq)) {
            moves.push(one);
            if from.0 == home {
                if let Some(two) = step(one, dir, 0).filter(|&sq| board.is_empty(sq)) {
                    moves.push(two);
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(diag) = step(from, dir, dc) {
                if board.color_at(diag) == Some(piece.color.opponent()) {
                    moves.push(diag);
                }
            }
        }
        moves
    }
}

pub struct Rook;

impl Movement for Rook {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        slide(board, from, piece.color, &ROOK_DIRS)
    }
}

pub struct Bishop;

impl Movement for Bishop {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        slide(board, from, piece.color, &BISHOP_DIRS)
    }
}

/// Rook and Bishop patterns from the same origin.
pub struct Queen;

impl Movement for Queen {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, c: bool) -> Vec<Square> {
        let mut moves = Rook.destinations(board, from, piece, c);
        moves.extend(Bishop.destinations(board, from, piece, c));
        moves
    }
}

pub struct Knight;

impl Movement for Knight {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        leap(board, from, piece.color, &KNIGHT_JUMPS)
    }
}

pub struct King;

impl Movement for King {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        leap(board, from, piece.color, &KING_STEPS)
    }
}

// =============================================================================
// Special variant
// =============================================================================

/// Lands on a square rolled by the controller. Has no destination list of its
/// own; any on-board square not holding a friendly piece is accepted.
pub struct Mage;

impl Movement for Mage {
    fn destinations(&self, _: &Board, _: Square, _: &Piece, _: bool) -> Vec<Square> {
        Vec::new()
    }

    fn is_legal_move(&self, board: &Board, _: Square, to: Square, piece: &Piece, _: bool) -> bool {
        in_bounds(to) && board.color_at(to) != Some(piece.color)
    }

    fn moves_randomly(&self) -> bool {
        true
    }
}

pub struct Spearman;

impl Movement for Spearman {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, _: bool) -> Vec<Square> {
        let dir = piece.color.forward();
        leap(board, from, piece.color, &[(dir, -1), (dir, 0), (dir, 1)])
    }
}

/// Borrows the rule of the last kind it captured.
pub struct Demon;

impl Demon {
    /// A Demon that swallowed another Demon gets a fresh Demon's power.
    fn delegate(power: Option<PieceKind>) -> PieceKind {
        match power {
            None | Some(PieceKind::Demon) => PieceKind::King,
            Some(kind) => kind,
        }
    }
}

impl Movement for Demon {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, c: bool) -> Vec<Square> {
        rule(Self::delegate(piece.power())).destinations(board, from, piece, c)
    }
}

// =============================================================================
// Checkers
// =============================================================================

/// Checkers moves need an empty landing square.
fn checkers_move_is_legal(
    rule: &dyn Movement,
    board: &Board,
    from: Square,
    to: Square,
    piece: &Piece,
    capturing: bool,
) -> bool {
    in_bounds(to) && board.is_empty(to) && rule.destinations(board, from, piece, capturing).contains(&to)
}

/// An uncrowned checker. Jumps in all four diagonals, steps only forward.
pub struct Checker;

impl Movement for Checker {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, capturing: bool) -> Vec<Square> {
        let enemy = piece.color.opponent();
        let jumps: Vec<Square> = BISHOP_DIRS
            .iter()
            .filter_map(|&(dr, dc)| {
                let over = step(from, dr, dc)?;
                let land = step(from, 2 * dr, 2 * dc)?;
                (board.color_at(over) == Some(enemy) && board.is_empty(land)).then_some(land)
            })
            .collect();
        if capturing || !jumps.is_empty() {
            return jumps;
        }

        let dir = piece.color.forward();
        [-1, 1]
            .into_iter()
            .filter_map(|dc| step(from, dir, dc))
            .filter(|&sq| board.is_empty(sq))
            .collect()
    }

    fn is_legal_move(&self, board: &Board, from: Square, to: Square, piece: &Piece, c: bool) -> bool {
        checkers_move_is_legal(self, board, from, to, piece, c)
    }
}

/// A crowned checker: slides along diagonals, captures by jumping the first
/// enemy met on a diagonal when the square just beyond it is free.
pub struct KingChecker;

impl Movement for KingChecker {
    fn destinations(&self, board: &Board, from: Square, piece: &Piece, capturing: bool) -> Vec<Square> {
        let mut slides = Vec::new();
        let mut jumps = Vec::new();
        for (dr, dc) in BISHOP_DIRS {
            let mut cur = from;
            while let Some(next) = step(cur, dr, dc) {
                match board.color_at(next) {
                    None => slides.push(next),
                    Some(c) => {
                        if c != piece.color {
                            if let Some(land) = step(next, dr, dc).filter(|&sq| board.is_empty(sq)) {
                                jumps.push(land);
                            }
                        }
                        break;
                    }
                }
                cur = next;
            }
        }
        if capturing || !jumps.is_empty() { jumps } else { slides }
    }

    fn is_legal_move(&self, board: &Board, from: Square, to: Square, piece: &Piece, c: bool) -> bool {
        checkers_move_is_legal(self, board, from, to, piece, c)
    }
}
