//! Constants for board dimensions, game rules, and MCTS parameters.
//!
//! The board geometry is fixed at compile time: standard English draughts is
//! played on an 8x8 board whose 32 dark squares are the only playable tiles.
//! Fixing the size here lets tile arithmetic (neighbors, rows, notation) run
//! as pure functions without a board instance.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). English draughts uses the standard 8x8 board.
pub const BOARD_SIZE: usize = 8;

/// Number of playable (dark) tiles per row.
pub const ROW_LEN: usize = BOARD_SIZE / 2;

/// Total number of playable tiles, numbered 1..=NB_PLAYABLE_TILES
/// left to right, top to bottom (Manouri notation).
pub const NB_PLAYABLE_TILES: usize = BOARD_SIZE * ROW_LEN;

/// Rows filled with men for each side at the start of a game.
/// Black occupies the top rows (tiles 1..=12), White the bottom ones
/// (tiles 21..=32).
pub const START_ROWS: usize = 3;

// =============================================================================
// Game Rules
// =============================================================================

/// Number of consecutive king moves without any capture after which the
/// game is declared a draw.
pub const KING_MOVES_DRAW_LIMIT: u32 = 25;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Exploration constant of the UCT selection formula.
pub const UCT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Number of random playouts run from a node when it is first expanded.
/// Also guarantees every node has at least one visit before its score
/// is ever read.
pub const ROLLOUTS_PER_EXPANSION: u32 = 2;

/// Default search time budget per move, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1000;
