//! Game abstraction consumed by the search engine.
//!
//! The MCTS engine only ever sees a [`Game`]: something it can clone, ask for
//! the side to move and the legal moves, advance by one move, and test for a
//! winner. The draughts rules engine is the one concrete implementer.

use std::fmt;

/// One of the two sides of a game, or `None` for "no active player".
///
/// `None` is only ever a draw sentinel returned by [`Game::winner`]; it never
/// identifies a move-maker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
    None,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
            PlayerId::None => PlayerId::None,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "player one"),
            PlayerId::Two => write!(f, "player two"),
            PlayerId::None => write!(f, "nobody"),
        }
    }
}

/// A two-player perfect-information game, as seen by the search engine.
pub trait Game: Clone {
    /// A move of the game. Equality is value equality, display is the game's
    /// text notation.
    type Move: Clone + PartialEq + Eq + fmt::Display;

    /// The player to move.
    fn player(&self) -> PlayerId;

    /// All legal moves for the player to move. Empty when that player is
    /// stuck (or the game is over by piece count).
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Apply a move for the player to move. `None` means the player cannot
    /// (or will not) move and forfeits the game.
    fn play(&mut self, mv: Option<&Self::Move>);

    /// `None` while the game is running, `Some(PlayerId::None)` for a draw,
    /// the winning side otherwise.
    fn winner(&self) -> Option<PlayerId>;

    /// Human-readable rendering of the state.
    fn view(&self) -> String;
}
