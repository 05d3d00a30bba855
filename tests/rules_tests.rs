//! Rules engine tests for English draughts.
//!
//! Standard positions exercise move generation (forced captures, branching
//! capture chains, king moves), move application (relocation, removal,
//! crowning) and the terminal conditions (piece exhaustion, forfeit, the
//! 25 king moves draw rule).

use draughts_mcts::board::{CheckerBoard, Color, Piece, Tile};
use draughts_mcts::draughts::{DraughtsMove, EnglishDraughts};
use draughts_mcts::game::{Game, PlayerId};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a game from explicit piece placements, White to move.
fn game_with(
    white_men: &[Tile],
    white_kings: &[Tile],
    black_men: &[Tile],
    black_kings: &[Tile],
) -> EnglishDraughts {
    let mut board = CheckerBoard::empty();
    for &t in white_men {
        board.set(t, Piece::man(Color::White));
    }
    for &t in white_kings {
        board.set(t, Piece::king(Color::White));
    }
    for &t in black_men {
        board.set(t, Piece::man(Color::Black));
    }
    for &t in black_kings {
        board.set(t, Piece::king(Color::Black));
    }
    EnglishDraughts::with_board(board)
}

/// Notations of all legal moves of the current state, sorted.
fn notations(game: &EnglishDraughts) -> Vec<String> {
    let mut list: Vec<String> = game
        .possible_moves()
        .iter()
        .map(|m| m.to_string())
        .collect();
    list.sort();
    list
}

/// Sorted owned copies of expected notations.
fn sorted(mut expected: Vec<&str>) -> Vec<String> {
    expected.sort();
    expected.into_iter().map(String::from).collect()
}

/// Parse a notation into a move; test inputs are known good.
fn mv(s: &str) -> DraughtsMove {
    s.parse().unwrap()
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_opening_moves_for_white() {
    // Seven forward advances by the four men of the front row
    let game = EnglishDraughts::new();
    assert_eq!(
        notations(&game),
        sorted(vec![
            "21-17", "22-17", "22-18", "23-18", "23-19", "24-19", "24-20"
        ])
    );
}

#[test]
fn test_opening_replies_for_black() {
    let mut game = EnglishDraughts::new();
    game.play(Some(&mv("21-17")));
    assert_eq!(game.player(), PlayerId::Two);
    assert_eq!(
        notations(&game),
        sorted(vec![
            "9-13", "9-14", "10-14", "10-15", "11-15", "11-16", "12-16"
        ])
    );
}

#[test]
fn test_single_capture_is_forced() {
    // One white man can jump, so every displacement move disappears
    let game = game_with(&[16, 18, 19], &[7], &[11, 15], &[24]);
    assert_eq!(notations(&game), sorted(vec!["19x10"]));
}

#[test]
fn test_kings_capture_backward() {
    let game = game_with(&[16, 18, 19], &[7], &[10, 15], &[24]);
    assert_eq!(notations(&game), sorted(vec!["18x11", "7x14"]));
}

#[test]
fn test_branching_capture_chains_are_all_reported() {
    // The king on 10 has a single jump and a two-hop chain, the man on 18
    // has two distinct continuations after its first jump
    let game = game_with(&[18, 19], &[10], &[6, 8, 15], &[7]);
    assert_eq!(
        notations(&game),
        sorted(vec!["10x1", "10x3x12", "18x11x2", "18x11x4"])
    );
}

#[test]
fn test_man_chains_stop_where_king_chains_continue() {
    // Same shape with the king starting from 1: the man reaching 3 cannot
    // turn back down the board, the king passing through 3 can
    let game = game_with(&[18, 19], &[1], &[6, 8, 15], &[7]);
    assert_eq!(
        notations(&game),
        sorted(vec!["1x10x3x12", "19x10x3", "18x11x2", "18x11x4"])
    );
}

// =============================================================================
// Move application
// =============================================================================

#[test]
fn test_play_moves_the_piece() {
    let mut game = EnglishDraughts::new();
    game.play(Some(&mv("21-17")));
    assert!(game.board().is_empty(21));
    assert_eq!(game.board().get(17), Some(Piece::man(Color::White)));

    game.play(Some(&mv("10-14")));
    assert!(game.board().is_empty(10));
    assert_eq!(game.board().get(14), Some(Piece::man(Color::Black)));
}

#[test]
fn test_playing_a_capture_removes_the_jumped_piece() {
    let mut game = game_with(&[16, 18, 19], &[7], &[11, 15], &[24]);
    game.play(Some(&mv("19x10")));
    assert!(game.board().is_empty(19));
    assert!(game.board().is_empty(15), "the jumped man must disappear");
    assert_eq!(game.board().get(10), Some(Piece::man(Color::White)));
    assert_eq!(game.board().count(Color::Black), 2);
}

#[test]
fn test_capture_chain_accounting() {
    // A chain of k hops removes exactly k opposing pieces and relocates one
    // piece from the first tile to the last
    let mut game = game_with(&[18, 19], &[10], &[6, 8, 15], &[7]);
    game.play(Some(&mv("18x11x4")));

    assert!(game.board().is_empty(18));
    assert!(game.board().is_empty(15));
    assert!(game.board().is_empty(8));
    assert_eq!(game.board().count(Color::White), 3);
    assert_eq!(game.board().count(Color::Black), 2);
    // Tile 4 is on black's back row, so the man arrives crowned
    assert_eq!(game.board().get(4), Some(Piece::king(Color::White)));
}

#[test]
fn test_promotion_on_a_plain_step() {
    let mut game = game_with(&[5], &[], &[20], &[]);
    game.play(Some(&mv("5-1")));
    assert_eq!(game.board().get(1), Some(Piece::king(Color::White)));
}

// =============================================================================
// Terminal conditions
// =============================================================================

#[test]
fn test_winner_by_piece_exhaustion() {
    let only_blacks = game_with(&[], &[], &[11], &[]);
    assert_eq!(only_blacks.winner(), Some(PlayerId::Two));

    let only_whites = game_with(&[22], &[], &[], &[]);
    assert_eq!(only_whites.winner(), Some(PlayerId::One));
}

#[test]
fn test_black_forfeit_gives_white_the_win() {
    let mut game = EnglishDraughts::new();
    game.play(Some(&mv("21-17")));
    game.play(None);
    assert_eq!(game.winner(), Some(PlayerId::One));
}

#[test]
fn test_twentyfive_quiet_king_moves_draw_the_game() {
    let mut game = game_with(&[], &[22], &[], &[10]);
    for _ in 0..6 {
        game.play(Some(&mv("22-25")));
        game.play(Some(&mv("10-7")));
        game.play(Some(&mv("25-22")));
        game.play(Some(&mv("7-10")));
        assert_eq!(game.winner(), None);
    }
    // 24 quiet king moves so far, the 25th ends the game as a draw
    game.play(Some(&mv("22-25")));
    assert_eq!(game.winner(), Some(PlayerId::None));
}

#[test]
fn test_king_capture_resets_the_draw_counter() {
    let mut game = game_with(&[], &[22], &[], &[10, 2]);

    // 20 quiet king moves
    for _ in 0..5 {
        game.play(Some(&mv("22-25")));
        game.play(Some(&mv("10-7")));
        game.play(Some(&mv("25-22")));
        game.play(Some(&mv("7-10")));
    }
    assert_eq!(game.winner(), None);

    // Two more quiet moves bring the counter to 22, then black walks into a
    // capture, which White is forced to take
    game.play(Some(&mv("22-18")));
    game.play(Some(&mv("10-14")));
    assert_eq!(notations(&game), sorted(vec!["18x9"]));
    game.play(Some(&mv("18x9")));
    assert_eq!(game.winner(), None);

    // The capture restarted the count: 24 further quiet king moves still do
    // not end the game, the 25th does
    for _ in 0..6 {
        game.play(Some(&mv("2-7")));
        game.play(Some(&mv("9-13")));
        game.play(Some(&mv("7-2")));
        game.play(Some(&mv("13-9")));
        assert_eq!(game.winner(), None);
    }
    game.play(Some(&mv("2-7")));
    assert_eq!(game.winner(), Some(PlayerId::None));
}

#[test]
fn test_promotion_ply_does_not_advance_the_draw_counter() {
    let mut game = game_with(&[5], &[], &[], &[24]);

    // The promoting step is made by a man, so the counter stays at zero
    game.play(Some(&mv("5-1")));
    assert_eq!(game.board().get(1), Some(Piece::king(Color::White)));

    // 24 king moves pass without ending the game, the 25th draws it
    for _ in 0..6 {
        game.play(Some(&mv("24-28")));
        game.play(Some(&mv("1-5")));
        game.play(Some(&mv("28-24")));
        game.play(Some(&mv("5-1")));
        assert_eq!(game.winner(), None);
    }
    game.play(Some(&mv("24-28")));
    assert_eq!(game.winner(), Some(PlayerId::None));
}

// =============================================================================
// Properties over random play
// =============================================================================

#[test]
fn test_random_play_respects_the_forced_capture_law() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..20 {
        let mut game = EnglishDraughts::new();
        let mut pieces = game.board().count(Color::White) + game.board().count(Color::Black);
        while game.winner().is_none() {
            let moves = game.possible_moves();
            let mover = match game.player() {
                PlayerId::One => Color::White,
                _ => Color::Black,
            };
            let any_capture = moves.iter().any(|m| m.is_capture());
            for m in &moves {
                let piece = game.board().get(m.tiles()[0]).unwrap();
                assert_eq!(piece.color, mover, "move {m} does not start on a mover piece");
                if any_capture {
                    assert!(m.is_capture(), "step {m} offered while a capture exists");
                }
            }
            let pick = rng.choice(moves);
            game.play(pick.as_ref());

            let now = game.board().count(Color::White) + game.board().count(Color::Black);
            assert!(now <= pieces, "pieces can never come back");
            pieces = now;
        }
    }
}
