//! English draughts rules engine.
//!
//! Implements the full move generation and application rules:
//! - forced capture: whenever any capture chain exists for the side to move,
//!   plain displacement moves are illegal
//! - multi-captures found by recursive chain search, every branch reported
//! - crowning on the opponent's back row
//! - draw after 25 consecutive king moves without a capture
//!
//! A player with no legal moves forfeits by playing `None`, which makes the
//! opponent the winner.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{
    are_neighbors, is_crowning_tile, is_playable_tile, neighbor, tile_between, CheckerBoard,
    Color, Piece, Tile,
};
use crate::constants::KING_MOVES_DRAW_LIMIT;
use crate::game::{Game, PlayerId};

/// A draughts move: the successive tile numbers visited by one piece, either
/// a single diagonal step or the stops of a capture chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraughtsMove {
    tiles: Vec<Tile>,
}

impl DraughtsMove {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// A move is a capture when any consecutive pair of stops is a jump
    /// rather than a step between neighbors.
    pub fn is_capture(&self) -> bool {
        self.tiles
            .windows(2)
            .any(|pair| !are_neighbors(pair[0], pair[1]))
    }
}

/// Manouri notation: tiles joined by `-` for steps and `x` for jumps,
/// e.g. `11-15` or `18x11x4`.
impl fmt::Display for DraughtsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &tile) in self.tiles.iter().enumerate() {
            if i > 0 {
                let sep = if are_neighbors(self.tiles[i - 1], tile) {
                    '-'
                } else {
                    'x'
                };
                write!(f, "{sep}")?;
            }
            write!(f, "{tile}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("a move needs at least two tiles")]
    TooShort,
    #[error("'{0}' is not a tile number")]
    BadTile(String),
    #[error("tile {0} is outside the board")]
    OffBoard(Tile),
}

impl FromStr for DraughtsMove {
    type Err = ParseMoveError;

    /// Accepts both separators regardless of whether a pair is actually a
    /// jump, so `19-10` parses to the same move as `19x10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tiles = Vec::new();
        for part in s.split(['x', 'X', '-']) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let tile: Tile = part
                .parse()
                .map_err(|_| ParseMoveError::BadTile(part.to_string()))?;
            if !is_playable_tile(tile) {
                return Err(ParseMoveError::OffBoard(tile));
            }
            tiles.push(tile);
        }
        if tiles.len() < 2 {
            return Err(ParseMoveError::TooShort);
        }
        Ok(DraughtsMove::new(tiles))
    }
}

/// The state of an English draughts game.
///
/// Player one holds the white pieces and moves first, player two the black
/// pieces.
#[derive(Clone, Debug)]
pub struct EnglishDraughts {
    board: CheckerBoard,
    player: PlayerId,
    /// Incremented after every ply.
    turn: u32,
    king_moves_without_capture: u32,
    /// The player who gave up by playing a null move, if any.
    forfeited: Option<PlayerId>,
}

impl Default for EnglishDraughts {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishDraughts {
    /// Game on the standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_board(CheckerBoard::new())
    }

    /// Game starting from an arbitrary position, White to move.
    pub fn with_board(board: CheckerBoard) -> Self {
        Self {
            board,
            player: PlayerId::One,
            turn: 1,
            king_moves_without_capture: 0,
            forfeited: None,
        }
    }

    pub fn board(&self) -> &CheckerBoard {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player_name(player: PlayerId) -> &'static str {
        match player {
            PlayerId::One => "Player with the whites",
            PlayerId::Two => "Player with the blacks",
            PlayerId::None => "Nobody",
        }
    }
}

/// Color played by a side, or `None` for the draw sentinel.
fn checker_color(player: PlayerId) -> Option<Color> {
    match player {
        PlayerId::One => Some(Color::White),
        PlayerId::Two => Some(Color::Black),
        PlayerId::None => None,
    }
}

/// All capture chains available to `piece` standing on `from`, as sequences
/// of landing tiles (the origin excluded).
///
/// `visited` carries the stops of the chain currently being explored and is
/// restored before a sibling branch is tried, so one branch never blocks
/// another. Capture directions come from `piece` itself, which keeps the
/// origin's color and king status through the whole recursion.
fn capture_chains(
    board: &CheckerBoard,
    from: Tile,
    piece: Piece,
    visited: &mut Vec<Tile>,
) -> Vec<Vec<Tile>> {
    let mut chains = Vec::new();
    for &dir in piece.directions() {
        let Some(target) = neighbor(from, dir) else {
            continue;
        };
        let Some(dest) = neighbor(target, dir) else {
            continue;
        };
        let capturable = matches!(board.get(target), Some(p) if p.color != piece.color);
        if !capturable || !board.is_empty(dest) || visited.contains(&dest) {
            continue;
        }
        visited.push(from);
        let continuations = capture_chains(board, dest, piece, visited);
        visited.pop();
        if continuations.is_empty() {
            chains.push(vec![dest]);
        } else {
            for mut chain in continuations {
                chain.insert(0, dest);
                chains.push(chain);
            }
        }
    }
    chains
}

/// Single-step displacement moves for `piece` standing on `from`.
fn step_moves(board: &CheckerBoard, from: Tile, piece: Piece, moves: &mut Vec<DraughtsMove>) {
    for &dir in piece.directions() {
        if let Some(dest) = neighbor(from, dir) {
            if board.is_empty(dest) {
                moves.push(DraughtsMove::new(vec![from, dest]));
            }
        }
    }
}

impl Game for EnglishDraughts {
    type Move = DraughtsMove;

    fn player(&self) -> PlayerId {
        self.player
    }

    fn possible_moves(&self) -> Vec<DraughtsMove> {
        let Some(color) = checker_color(self.player) else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for tile in self.board.tiles_of(color) {
            if let Some(piece) = self.board.get(tile) {
                let mut visited = Vec::new();
                for chain in capture_chains(&self.board, tile, piece, &mut visited) {
                    let mut tiles = Vec::with_capacity(chain.len() + 1);
                    tiles.push(tile);
                    tiles.extend(chain);
                    moves.push(DraughtsMove::new(tiles));
                }
            }
        }
        // Captures are mandatory; plain steps are only legal when no piece
        // of the mover can capture
        if moves.is_empty() {
            for tile in self.board.tiles_of(color) {
                if let Some(piece) = self.board.get(tile) {
                    step_moves(&self.board, tile, piece, &mut moves);
                }
            }
        }
        moves
    }

    fn play(&mut self, mv: Option<&DraughtsMove>) {
        let Some(mv) = mv else {
            // A player unable (or unwilling) to move forfeits
            if self.player != PlayerId::None {
                self.forfeited = Some(self.player);
            }
            return;
        };
        let Some(color) = checker_color(self.player) else {
            return;
        };
        let tiles = mv.tiles();
        if tiles.len() < 2 || !tiles.iter().all(|&t| is_playable_tile(t)) {
            return;
        }

        let was_king = matches!(self.board.get(tiles[0]), Some(p) if p.king);
        let mut captured = false;
        for pair in tiles.windows(2) {
            self.board.relocate(pair[0], pair[1]);
            if !are_neighbors(pair[0], pair[1]) {
                if let Some(mid) = tile_between(pair[0], pair[1]) {
                    if self.board.remove(mid).is_some() {
                        captured = true;
                    }
                }
            }
        }

        // The draw counter only tracks king moves: a capture by a king
        // resets it, a quiet king move advances it, men leave it untouched.
        // King status is taken before the move, so a freshly crowned man
        // does not count yet.
        if was_king {
            if captured {
                self.king_moves_without_capture = 0;
            } else {
                self.king_moves_without_capture += 1;
            }
        }

        let dest = tiles[tiles.len() - 1];
        if is_crowning_tile(color, dest) {
            self.board.crown(dest);
        }

        self.player = self.player.opponent();
        self.turn += 1;
    }

    fn winner(&self) -> Option<PlayerId> {
        if !self.board.has_pieces(Color::Black) || self.forfeited == Some(PlayerId::Two) {
            Some(PlayerId::One)
        } else if !self.board.has_pieces(Color::White) || self.forfeited == Some(PlayerId::One) {
            Some(PlayerId::Two)
        } else if self.king_moves_without_capture >= KING_MOVES_DRAW_LIMIT {
            Some(PlayerId::None)
        } else {
            None
        }
    }

    fn view(&self) -> String {
        format!(
            "{}Turn #{}. {} plays.\n",
            self.board,
            self.turn,
            Self::player_name(self.player)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_notation_step() {
        let mv = DraughtsMove::new(vec![21, 17]);
        assert_eq!(mv.to_string(), "21-17");
        assert!(!mv.is_capture());
    }

    #[test]
    fn test_move_notation_capture_chain() {
        let mv = DraughtsMove::new(vec![18, 11, 4]);
        assert_eq!(mv.to_string(), "18x11x4");
        assert!(mv.is_capture());
    }

    #[test]
    fn test_move_parse_roundtrip() {
        let mv: DraughtsMove = "18x11x4".parse().unwrap();
        assert_eq!(mv, DraughtsMove::new(vec![18, 11, 4]));
        assert_eq!(mv.to_string(), "18x11x4");
    }

    #[test]
    fn test_move_parse_accepts_either_separator() {
        // Separators carry no meaning on input: a jump typed with '-' still
        // renders back as 'x'
        let mv: DraughtsMove = "19-10".parse().unwrap();
        assert_eq!(mv, DraughtsMove::new(vec![19, 10]));
        assert_eq!(mv.to_string(), "19x10");
    }

    #[test]
    fn test_move_parse_errors() {
        assert_eq!("".parse::<DraughtsMove>(), Err(ParseMoveError::TooShort));
        assert_eq!("12".parse::<DraughtsMove>(), Err(ParseMoveError::TooShort));
        assert_eq!(
            "a-4".parse::<DraughtsMove>(),
            Err(ParseMoveError::BadTile("a".to_string()))
        );
        assert_eq!(
            "33x1".parse::<DraughtsMove>(),
            Err(ParseMoveError::OffBoard(33))
        );
    }

    #[test]
    fn test_new_game_state() {
        let game = EnglishDraughts::new();
        assert_eq!(game.player(), PlayerId::One);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_play_rejects_malformed_moves() {
        let mut game = EnglishDraughts::new();
        let before = game.board().clone();

        game.play(Some(&DraughtsMove::new(vec![21])));
        assert_eq!(*game.board(), before);
        assert_eq!(game.turn(), 1);

        game.play(Some(&DraughtsMove::new(vec![21, 40])));
        assert_eq!(*game.board(), before);
        assert_eq!(game.player(), PlayerId::One);
    }

    #[test]
    fn test_forfeit_makes_opponent_winner() {
        let mut game = EnglishDraughts::new();
        game.play(None);
        assert_eq!(game.winner(), Some(PlayerId::Two));
        // Forfeit does not advance the game state
        assert_eq!(game.player(), PlayerId::One);
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_turn_counts_every_ply() {
        let mut game = EnglishDraughts::new();
        game.play(Some(&DraughtsMove::new(vec![21, 17])));
        assert_eq!(game.turn(), 2);
        assert_eq!(game.player(), PlayerId::Two);
        game.play(Some(&DraughtsMove::new(vec![9, 13])));
        assert_eq!(game.turn(), 3);
        assert_eq!(game.player(), PlayerId::One);
    }
}
