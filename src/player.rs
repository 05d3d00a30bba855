//! Players: strategies that pick the next move of a game.
//!
//! A [`Player`] either returns a move from the current legal set or `None`,
//! which the rules engine records as a forfeit.

use std::fmt;
use std::io::{self, Write as _};
use std::str::FromStr;
use std::time::Duration;

use crate::game::Game;
use crate::mcts::MonteCarloTreeSearch;

/// Uniformly random legal move of the current state, `None` when the side
/// to move has none.
pub fn random_move<G: Game>(game: &G, rng: &mut fastrand::Rng) -> Option<G::Move> {
    rng.choice(game.possible_moves())
}

/// A strategy able to choose the next move of a game.
pub trait Player<G: Game> {
    fn play(&mut self, game: &G) -> Option<G::Move>;
}

/// Plays uniformly at random.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<G: Game> Player<G> for RandomPlayer {
    fn play(&mut self, game: &G) -> Option<G::Move> {
        random_move(game, &mut self.rng)
    }
}

/// Searches every position it is handed with a fresh Monte-Carlo tree under
/// a fixed wall-clock budget.
pub struct MctsPlayer {
    budget: Duration,
    rng: fastrand::Rng,
}

impl MctsPlayer {
    pub fn new(budget: Duration, seed: u64) -> Self {
        Self {
            budget,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<G: Game> Player<G> for MctsPlayer {
    fn play(&mut self, game: &G) -> Option<G::Move> {
        let mut search = MonteCarloTreeSearch::new(game.clone(), self.rng.fork());
        search.evaluate_tree_with_time_limit(self.budget);
        log::debug!("{}", search.stats());
        match search.best_move() {
            Some(mv) => Some(mv.clone()),
            // The budget was too short to grow the tree at all
            None => random_move(game, &mut self.rng),
        }
    }
}

/// Reads moves from standard input in their text notation. Unparsable or
/// illegal input prompts again, end of input forfeits.
pub struct HumanPlayer;

impl<G: Game> Player<G> for HumanPlayer
where
    G::Move: FromStr,
    <G::Move as FromStr>::Err: fmt::Display,
{
    fn play(&mut self, game: &G) -> Option<G::Move> {
        let legal = game.possible_moves();
        if legal.is_empty() {
            println!("no legal move available, you forfeit");
            return None;
        }
        let listing: Vec<String> = legal.iter().map(|mv| mv.to_string()).collect();
        println!("possible moves: {}", listing.join(" "));

        let mut line = String::new();
        loop {
            print!("your move> ");
            let _ = io::stdout().flush();
            line.clear();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            match input.parse::<G::Move>() {
                // Hand back the instance from the legal set, not the parsed
                // one, so the engine only ever sees its own moves
                Ok(mv) => match legal.iter().find(|&m| *m == mv) {
                    Some(found) => return Some(found.clone()),
                    None => println!("illegal move, try again"),
                },
                Err(err) => println!("{err}"),
            }
        }
    }
}
