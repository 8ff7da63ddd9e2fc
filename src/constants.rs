//! Constants for board geometry and rule parameters.
//!
//! All three rule sets play on the same 8x8 grid. Rows are numbered from the
//! top of the printed board: row 0 is Black's back rank, row 7 is White's.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

// =============================================================================
// Chess Ranks
// =============================================================================

/// Row holding White's back rank in the chess layouts.
pub const WHITE_BACK_ROW: usize = 7;

/// Row holding Black's back rank in the chess layouts.
pub const BLACK_BACK_ROW: usize = 0;

/// Row White pawns start on; a pawn here may advance two squares.
pub const WHITE_PAWN_ROW: usize = 6;

/// Row Black pawns start on.
pub const BLACK_PAWN_ROW: usize = 1;

// =============================================================================
// Checkers Rows
// =============================================================================

/// Number of rows each side fills at the start of a checkers game.
pub const CHECKER_ROWS: usize = 3;

/// Row a White checker must reach to be crowned.
pub const WHITE_CROWN_ROW: usize = 0;

/// Row a Black checker must reach to be crowned.
pub const BLACK_CROWN_ROW: usize = N - 1;

// =============================================================================
// Move Counting
// =============================================================================

/// Move number shown before anyone has moved. Each ply adds half a move.
pub const FIRST_MOVE_NUMBER: f32 = 1.0;
