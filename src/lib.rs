//! Boardgame-Rules: move generation and rule validation for chess, a chess
//! variant with custom pieces, and checkers.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and starting rows
//! - [`piece`] - Colors, piece kinds and pieces
//! - [`movement`] - Per-kind movement rules and move validation
//! - [`board`] - The 8x8 grid, starting layouts and move execution
//! - [`record`] - Move records and the undo log
//! - [`game`] - Turn state machine, capture chains, undo and game end
//! - [`console`] - Text command front end
//!
//! ## Example
//!
//! ```
//! use boardgame_rules::game::{Game, Variant};
//!
//! let mut game = Game::new(Variant::Classic);
//!
//! // White pawn e2 may advance one or two squares.
//! assert_eq!(game.legal_destinations((6, 4)), vec![(5, 4), (4, 4)]);
//!
//! game.play((6, 4), (4, 4)).unwrap();
//! assert_eq!(game.move_count(), 1.5);
//!
//! game.undo().unwrap();
//! assert_eq!(game.move_count(), 1.0);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod movement;
pub mod piece;
pub mod record;
