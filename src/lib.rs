//! A Monte-Carlo tree search engine playing English draughts.
//!
//! The crate splits into a rules side and a search side, joined by the
//! [`game::Game`] capability trait: the search engine only ever talks to
//! that trait, never to the draughts internals.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`board`] - Checker board geometry and piece occupancy
//! - [`game`] - The game interface the search relies on
//! - [`draughts`] - English draughts rules: move generation and application
//! - [`mcts`] - Monte-Carlo tree search over any game
//! - [`player`] - Move-picking strategies: random, tree search, human
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use draughts_mcts::draughts::EnglishDraughts;
//! use draughts_mcts::mcts::MonteCarloTreeSearch;
//!
//! // Search the opening position for a short while
//! let game = EnglishDraughts::new();
//! let mut search = MonteCarloTreeSearch::new(game, fastrand::Rng::with_seed(42));
//! search.evaluate_tree_with_time_limit(Duration::from_millis(50));
//!
//! if let Some(best) = search.best_move() {
//!     println!("best move: {best}");
//! }
//! ```

pub mod board;
pub mod constants;
pub mod draughts;
pub mod game;
pub mod mcts;
pub mod player;
