//! Piece identity: color, kind and the Demon's borrowed power.
//!
//! A piece never knows where it stands. The board hands it its square on
//! every query, and the movement rules live in [`crate::movement`].

use std::fmt;

/// Side owning a piece. White always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step pointing towards the opponent's side of the board.
    #[inline]
    pub const fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Every kind of piece across the three rule sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    /// Special variant: lands on a random square.
    Mage,
    /// Special variant: one step to any of the three forward squares.
    Spearman,
    /// Special variant: moves like the last piece it captured.
    Demon,
    Checker,
    KingChecker,
}

impl PieceKind {
    /// Uppercase display letter; Black pieces print in lowercase.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'H',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Mage => 'M',
            PieceKind::Spearman => 'S',
            PieceKind::Demon => 'D',
            PieceKind::Checker => 'C',
            PieceKind::KingChecker => 'K',
        }
    }
}

/// A piece on (or captured from) the board.
///
/// `power` is only meaningful for [`PieceKind::Demon`]: it names the kind
/// whose movement the Demon currently borrows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    power: Option<PieceKind>,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        let power = (kind == PieceKind::Demon).then_some(PieceKind::King);
        Self { color, kind, power }
    }

    /// The kind whose rule this Demon currently borrows, or `None` for any
    /// other piece.
    pub fn power(&self) -> Option<PieceKind> {
        self.power
    }

    /// Hand a Demon the power of the piece it just captured. No effect on
    /// other kinds.
    pub fn absorb(&mut self, captured: PieceKind) {
        if self.kind == PieceKind::Demon {
            self.power = Some(captured);
        }
    }

    pub fn symbol(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demon_starts_with_king_power() {
        let demon = Piece::new(Color::White, PieceKind::Demon);
        assert_eq!(demon.power(), Some(PieceKind::King));

        let rook = Piece::new(Color::White, PieceKind::Rook);
        assert_eq!(rook.power(), None);
    }

    #[test]
    fn test_absorb_only_changes_demons() {
        let mut demon = Piece::new(Color::Black, PieceKind::Demon);
        demon.absorb(PieceKind::Knight);
        assert_eq!(demon.power(), Some(PieceKind::Knight));

        let mut queen = Piece::new(Color::Black, PieceKind::Queen);
        queen.absorb(PieceKind::Knight);
        assert_eq!(queen.power(), None);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).symbol(), 'H');
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).symbol(), 'h');
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.forward(), 1);
    }
}
