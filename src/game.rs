//! Game controller: turn order, selection, capture chains, undo and the end
//! of the game.
//!
//! A turn runs `AwaitingSelection -> AwaitingDestination -> apply -> switch`.
//! Checkers inserts a `ContinuingCapture` phase after a jump that can be
//! followed by another jump; the turn only passes once the chain is done.
//! Capturing a King ends a chess game; taking the last enemy piece ends a
//! checkers game. There is no check, stalemate or draw detection.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::board::{Board, MoveError, Square};
use crate::constants::{FIRST_MOVE_NUMBER, N};
use crate::piece::{Color, Piece, PieceKind};
use crate::record::{MoveLog, MoveRecord};

/// Rule set and starting layout of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    Classic,
    Special,
    Checkers,
}

impl Variant {
    pub fn initial_board(self) -> Board {
        match self {
            Variant::Classic => Board::classic(),
            Variant::Special => Board::special(),
            Variant::Checkers => Board::checkers(),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "special" => Ok(Variant::Special),
            "checkers" => Ok(Variant::Checkers),
            other => Err(format!("unknown variant: {other} (expected classic, special or checkers)")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Classic => "classic",
            Variant::Special => "special",
            Variant::Checkers => "checkers",
        };
        write!(f, "{name}")
    }
}

/// Where the controller stands within a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    /// A piece has been selected and its destination is awaited.
    AwaitingDestination(Square),
    /// Checkers: the piece on this square just jumped and must jump again.
    ContinuingCapture(Square),
    GameOver { winner: Color },
}

/// Result of selecting a piece.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// The piece waits for one of these destinations.
    Destinations(Vec<Square>),
    /// The piece moves randomly and has already been moved.
    Resolved(Outcome),
}

/// Result of a successfully applied move.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// False while a checkers capture chain must go on.
    pub turn_over: bool,
    pub winner: Option<Color>,
}

/// One game in progress. Owns the board, the turn state and the undo log.
pub struct Game {
    variant: Variant,
    board: Board,
    turn: Color,
    /// Completed turns.
    plies: u32,
    log: MoveLog,
    phase: Phase,
    rng: fastrand::Rng,
}

impl Game {
    pub fn new(variant: Variant) -> Self {
        Self::from_board(variant, variant.initial_board(), Color::White)
    }

    /// A game whose random moves are reproducible.
    pub fn with_seed(variant: Variant, seed: u64) -> Self {
        let mut game = Self::new(variant);
        game.reseed(seed);
        game
    }

    /// A game starting from an arbitrary position with `turn` to move.
    pub fn from_board(variant: Variant, board: Board, turn: Color) -> Self {
        Self {
            variant,
            board,
            turn,
            plies: 0,
            log: MoveLog::new(),
            phase: Phase::AwaitingSelection,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn moves(&self) -> &MoveLog {
        &self.log
    }

    /// Move number: starts at 1 and grows by half a move per turn.
    pub fn move_count(&self) -> f32 {
        FIRST_MOVE_NUMBER + self.plies as f32 / 2.0
    }

    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    fn capturing(&self) -> bool {
        matches!(self.phase, Phase::ContinuingCapture(_))
    }

    /// Destinations for the piece on `from`, for move hints.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let capturing = self.phase == Phase::ContinuingCapture(from);
        self.board.legal_destinations(from, capturing)
    }

    /// Select the piece on `from` for the side to move.
    ///
    /// A randomly moving piece is moved straight away to a rolled square.
    pub fn select(&mut self, from: Square) -> Result<Selection, MoveError> {
        match self.phase {
            Phase::GameOver { .. } => return Err(MoveError::GameOver),
            Phase::ContinuingCapture(sq) if sq != from => return Err(MoveError::MustContinueCapture),
            _ => {}
        }
        let piece = *self.board.get(from).ok_or(MoveError::EmptySquare)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourPiece);
        }

        if piece.moves_randomly() {
            self.phase = Phase::AwaitingSelection;
            let to = (self.rng.usize(0..N), self.rng.usize(0..N));
            debug!(?from, ?to, "random destination rolled");
            return self.apply(from, to).map(Selection::Resolved);
        }

        let destinations = self.board.legal_destinations(from, self.capturing());
        if destinations.is_empty() {
            return Err(MoveError::NoLegalMoves);
        }
        if !self.capturing() {
            self.phase = Phase::AwaitingDestination(from);
        }
        Ok(Selection::Destinations(destinations))
    }

    /// Drop the current selection.
    pub fn cancel(&mut self) {
        if let Phase::AwaitingDestination(_) = self.phase {
            self.phase = Phase::AwaitingSelection;
        }
    }

    /// Move the selected piece to `to`.
    ///
    /// A refused destination clears the selection (a capture chain stays in
    /// force).
    pub fn choose(&mut self, to: Square) -> Result<Outcome, MoveError> {
        let from = match self.phase {
            Phase::AwaitingDestination(sq) | Phase::ContinuingCapture(sq) => sq,
            Phase::AwaitingSelection => return Err(MoveError::NoSelection),
            Phase::GameOver { .. } => return Err(MoveError::GameOver),
        };
        self.apply(from, to)
    }

    /// Select `from` and move it to `to` in one step. Randomly moving pieces
    /// ignore `to`.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Outcome, MoveError> {
        match self.select(from)? {
            Selection::Resolved(outcome) => Ok(outcome),
            Selection::Destinations(_) => self.choose(to),
        }
    }

    fn apply(&mut self, from: Square, to: Square) -> Result<Outcome, MoveError> {
        let capturing = self.capturing();
        let applied = match self.board.apply_move(from, to, capturing) {
            Ok(applied) => applied,
            Err(err) => {
                if !capturing {
                    self.phase = Phase::AwaitingSelection;
                }
                return Err(err);
            }
        };
        let captured = applied.captured.map(|c| c.piece);

        if let (Some(taken), Some(mover)) = (captured, self.board.get_mut(to)) {
            if mover.kind == PieceKind::Demon {
                mover.absorb(taken.kind);
                debug!(?to, power = ?taken.kind, "demon takes new power");
            }
        }

        let winner = self.winner_after(captured);
        let chain = winner.is_none()
            && self.variant == Variant::Checkers
            && captured.is_some()
            && !self.board.legal_destinations(to, true).is_empty();

        self.log.push(MoveRecord {
            from,
            to,
            moved: applied.moved,
            captured: applied.captured,
            mover: self.turn,
            ended_turn: !chain,
        });

        if let Some(winner) = winner {
            self.plies += 1;
            self.phase = Phase::GameOver { winner };
            info!(%winner, moves = self.move_count(), "game over");
        } else if chain {
            self.phase = Phase::ContinuingCapture(to);
        } else {
            self.plies += 1;
            self.turn = self.turn.opponent();
            self.phase = Phase::AwaitingSelection;
        }

        Ok(Outcome {
            from,
            to,
            captured,
            promoted: applied.promoted,
            turn_over: !chain,
            winner,
        })
    }

    fn winner_after(&self, captured: Option<Piece>) -> Option<Color> {
        let taken = captured?;
        let decisive = match self.variant {
            Variant::Classic | Variant::Special => taken.kind == PieceKind::King,
            Variant::Checkers => self.board.count(taken.color) == 0,
        };
        decisive.then_some(self.turn)
    }

    /// Take back the last applied move.
    ///
    /// Undoing a jump in the middle of a checkers chain puts the previous
    /// jumper back into its `ContinuingCapture` phase.
    pub fn undo(&mut self) -> Result<MoveRecord, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let record = self.log.pop().ok_or(MoveError::NothingToUndo)?;
        self.board.restore(&record);
        if record.ended_turn {
            self.plies = self.plies.saturating_sub(1);
        }
        self.turn = record.mover;
        self.phase = match self.log.last() {
            Some(prev) if !prev.ended_turn => Phase::ContinuingCapture(prev.to),
            _ => Phase::AwaitingSelection,
        };
        debug!(from = ?record.from, to = ?record.to, "move undone");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Ruleset;

    fn chess_board(pieces: &[(Square, Color, PieceKind)]) -> Board {
        let mut board = Board::empty(Ruleset::Chess);
        for &(sq, color, kind) in pieces {
            board.place(sq, Piece::new(color, kind));
        }
        board
    }

    #[test]
    fn test_new_game_state() {
        let game = Game::new(Variant::Classic);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 1.0);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert!(game.moves().is_empty());
    }

    #[test]
    fn test_turn_alternates_and_counter_advances() {
        let mut game = Game::new(Variant::Classic);
        game.play((6, 4), (4, 4)).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 1.5);
        game.play((1, 4), (3, 4)).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 2.0);
    }

    #[test]
    fn test_select_rejects_wrong_side() {
        let mut game = Game::new(Variant::Classic);
        assert_eq!(game.select((1, 4)), Err(MoveError::NotYourPiece));
        assert_eq!(game.select((4, 4)), Err(MoveError::EmptySquare));
        assert_eq!(game.select((7, 0)), Err(MoveError::NoLegalMoves));
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_rejected_destination_clears_selection() {
        let mut game = Game::new(Variant::Classic);
        game.select((6, 4)).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingDestination((6, 4)));
        assert_eq!(game.choose((3, 4)), Err(MoveError::IllegalMove));
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.choose((4, 4)), Err(MoveError::NoSelection));
    }

    #[test]
    fn test_cancel_selection() {
        let mut game = Game::new(Variant::Classic);
        game.select((7, 1)).unwrap();
        game.cancel();
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_undo_on_empty_log() {
        let mut game = Game::new(Variant::Special);
        assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_king_capture_ends_game() {
        let board = chess_board(&[
            ((7, 0), Color::White, PieceKind::Rook),
            ((0, 0), Color::Black, PieceKind::King),
            ((7, 4), Color::White, PieceKind::King),
        ]);
        let mut game = Game::from_board(Variant::Classic, board, Color::White);
        let outcome = game.play((7, 0), (0, 0)).unwrap();
        assert_eq!(outcome.winner, Some(Color::White));
        assert_eq!(game.phase(), Phase::GameOver { winner: Color::White });
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.select((7, 4)), Err(MoveError::GameOver));
        assert_eq!(game.undo(), Err(MoveError::GameOver));
    }

    #[test]
    fn test_demon_power_restored_on_undo() {
        let board = chess_board(&[
            ((4, 4), Color::White, PieceKind::Demon),
            ((3, 4), Color::Black, PieceKind::Rook),
        ]);
        let mut game = Game::from_board(Variant::Special, board, Color::White);
        game.play((4, 4), (3, 4)).unwrap();
        assert_eq!(game.board().get((3, 4)).and_then(|p| p.power()), Some(PieceKind::Rook));

        game.undo().unwrap();
        assert_eq!(game.board().get((4, 4)).and_then(|p| p.power()), Some(PieceKind::King));
        assert_eq!(game.board().get((3, 4)).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn test_mage_moves_on_selection() {
        let board = chess_board(&[((7, 3), Color::White, PieceKind::Mage)]);
        let mut game = Game::from_board(Variant::Special, board, Color::White);
        game.reseed(7);
        // Only its own square can be refused on an otherwise empty board.
        loop {
            match game.select((7, 3)) {
                Ok(Selection::Resolved(outcome)) => {
                    assert_eq!(outcome.from, (7, 3));
                    assert_ne!(outcome.to, (7, 3));
                    assert!(game.board().get(outcome.to).is_some());
                    assert_eq!(game.turn(), Color::Black);
                    break;
                }
                Err(MoveError::IllegalMove) => {
                    assert_eq!(game.turn(), Color::White);
                    assert!(game.moves().is_empty());
                }
                other => panic!("unexpected selection result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Checkers".parse::<Variant>(), Ok(Variant::Checkers));
        assert!("go".parse::<Variant>().is_err());
        assert_eq!(Variant::Special.to_string(), "special");
    }
}
