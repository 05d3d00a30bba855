//! Console driver for the draughts engine.
//!
//! ## Usage
//!
//! - `draughts-mcts` - Watch the engine play against a random opponent
//! - `draughts-mcts demo` - Same, explicitly
//! - `draughts-mcts play` - Play the whites against the engine
//! - `draughts-mcts play --black` - Play the blacks instead

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use draughts_mcts::constants::DEFAULT_TIME_BUDGET_MS;
use draughts_mcts::draughts::EnglishDraughts;
use draughts_mcts::game::{Game, PlayerId};
use draughts_mcts::player::{HumanPlayer, MctsPlayer, Player, RandomPlayer};

/// Monte-Carlo tree search playing English draughts
#[derive(Parser)]
#[command(name = "draughts-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Time budget per engine move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    time_ms: u64,

    /// Seed for reproducible runs; drawn from entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Log the per-move search statistics
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the engine play against a random opponent
    Demo,
    /// Play against the engine on the console
    Play {
        /// Take the black pieces instead of the whites
        #[arg(long)]
        black: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).context("logger setup failed")?;

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("random seed: {seed}");
    let budget = Duration::from_millis(cli.time_ms);

    match cli.command {
        Some(Commands::Play { black }) => run_interactive(budget, seed, black),
        Some(Commands::Demo) | None => run_demo(budget, seed),
    }

    Ok(())
}

/// Tree search against a uniformly random opponent.
fn run_demo(budget: Duration, seed: u64) {
    let mut white = MctsPlayer::new(budget, seed);
    let mut black = RandomPlayer::new(seed.wrapping_add(1));
    let winner = run_game(EnglishDraughts::new(), &mut white, &mut black);
    announce(winner);
}

/// Interactive game between a human on standard input and the tree search.
fn run_interactive(budget: Duration, seed: u64, human_plays_black: bool) {
    let mut human = HumanPlayer;
    let mut engine = MctsPlayer::new(budget, seed);
    let winner = if human_plays_black {
        run_game(EnglishDraughts::new(), &mut engine, &mut human)
    } else {
        run_game(EnglishDraughts::new(), &mut human, &mut engine)
    };
    announce(winner);
}

/// Drive a game to its end, rendering each position, and report the winner.
fn run_game(
    mut game: EnglishDraughts,
    white: &mut dyn Player<EnglishDraughts>,
    black: &mut dyn Player<EnglishDraughts>,
) -> PlayerId {
    loop {
        println!("{}", game.view());
        if let Some(winner) = game.winner() {
            return winner;
        }
        let side = game.player();
        let mv = if side == PlayerId::One {
            white.play(&game)
        } else {
            black.play(&game)
        };
        match &mv {
            Some(mv) => log::info!("{} plays {}", EnglishDraughts::player_name(side), mv),
            None => log::info!(
                "{} cannot move and forfeits",
                EnglishDraughts::player_name(side)
            ),
        }
        game.play(mv.as_ref());
    }
}

fn announce(winner: PlayerId) {
    if winner == PlayerId::None {
        log::info!("game over, draw by the 25 king moves rule");
    } else {
        log::info!("game over, {} wins", EnglishDraughts::player_name(winner));
    }
}
