//! Checker board representation: tile geometry and piece occupancy.
//!
//! Only the 32 dark squares of the board are playable. They are numbered
//! 1..=32 left to right, top to bottom (Manouri notation): row 1 holds tiles
//! 1-4, row 8 holds tiles 29-32. Rows alternate which half of the squares is
//! dark, so even rows (0-indexed) sit one square right of odd rows.
//!
//! Tile geometry (neighbors, jump midpoints, crowning rows) is pure arithmetic
//! over tile numbers and lives in free functions, so the move type can render
//! its notation without holding a board reference.

use std::fmt;

use crate::constants::{BOARD_SIZE, NB_PLAYABLE_TILES, ROW_LEN, START_ROWS};

/// A playable tile number, 1..=32.
pub type Tile = usize;

/// Piece color. White starts on the bottom rows and moves up the board
/// (toward tile 1), Black starts on the top rows and moves down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The four diagonal directions a piece can look in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
}

/// A checker on the board: a man or a king of one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub fn king(color: Color) -> Self {
        Self { color, king: true }
    }

    /// Directions this piece may move and capture in: men only forward
    /// (relative to their color), kings all four diagonals.
    pub fn directions(self) -> &'static [Direction] {
        if self.king {
            &Direction::ALL
        } else {
            match self.color {
                Color::White => &[Direction::UpLeft, Direction::UpRight],
                Color::Black => &[Direction::DownLeft, Direction::DownRight],
            }
        }
    }

    fn symbol(self) -> char {
        match (self.color, self.king) {
            (Color::White, false) => 'w',
            (Color::White, true) => 'W',
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
        }
    }
}

// =============================================================================
// Tile geometry
// =============================================================================

/// Row of a tile, 0-indexed from the top of the board.
fn tile_row(tile: Tile) -> usize {
    (tile - 1) / ROW_LEN
}

/// Offset of a tile within its row, 0..ROW_LEN from the left.
fn tile_offset(tile: Tile) -> usize {
    (tile - 1) % ROW_LEN
}

pub fn is_playable_tile(tile: Tile) -> bool {
    (1..=NB_PLAYABLE_TILES).contains(&tile)
}

/// Diagonal neighbor of a tile, or `None` when the step leaves the board.
pub fn neighbor(tile: Tile, dir: Direction) -> Option<Tile> {
    if !is_playable_tile(tile) {
        return None;
    }
    let row = tile_row(tile);
    let offset = tile_offset(tile);
    let (up, left) = match dir {
        Direction::UpLeft => (true, true),
        Direction::UpRight => (true, false),
        Direction::DownLeft => (false, true),
        Direction::DownRight => (false, false),
    };
    if up && row == 0 || !up && row + 1 == BOARD_SIZE {
        return None;
    }
    // Even rows sit one square right of odd rows: stepping left from an even
    // row keeps the in-row offset and stepping right increments it, while the
    // opposite holds from odd rows.
    let new_offset = match (left, row % 2 == 0) {
        (true, true) | (false, false) => Some(offset),
        (false, true) => (offset + 1 < ROW_LEN).then_some(offset + 1),
        (true, false) => offset.checked_sub(1),
    }?;
    let new_row = if up { row - 1 } else { row + 1 };
    Some(new_row * ROW_LEN + new_offset + 1)
}

/// Whether two tiles are direct diagonal neighbors.
pub fn are_neighbors(a: Tile, b: Tile) -> bool {
    Direction::ALL.iter().any(|&dir| neighbor(a, dir) == Some(b))
}

/// Midpoint of a jump: the tile diagonally between `from` and `to` when they
/// are exactly two diagonal steps apart, `None` otherwise.
pub fn tile_between(from: Tile, to: Tile) -> Option<Tile> {
    Direction::ALL.iter().find_map(|&dir| {
        let mid = neighbor(from, dir)?;
        (neighbor(mid, dir) == Some(to)).then_some(mid)
    })
}

/// Whether `tile` lies on the crowning row for `color`: the top row for
/// White, the bottom row for Black.
pub fn is_crowning_tile(color: Color, tile: Tile) -> bool {
    if !is_playable_tile(tile) {
        return false;
    }
    match color {
        Color::White => tile_row(tile) == 0,
        Color::Black => tile_row(tile) + 1 == BOARD_SIZE,
    }
}

// =============================================================================
// Occupancy
// =============================================================================

/// Occupancy of the 32 playable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerBoard {
    cells: [Option<Piece>; NB_PLAYABLE_TILES],
}

impl Default for CheckerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerBoard {
    /// Board set up for a new game: three rows of black men at the top,
    /// three rows of white men at the bottom.
    pub fn new() -> Self {
        let mut cells = [None; NB_PLAYABLE_TILES];
        for i in 0..START_ROWS * ROW_LEN {
            cells[i] = Some(Piece::man(Color::Black));
            cells[NB_PLAYABLE_TILES - 1 - i] = Some(Piece::man(Color::White));
        }
        Self { cells }
    }

    /// Board with no pieces at all.
    pub fn empty() -> Self {
        Self {
            cells: [None; NB_PLAYABLE_TILES],
        }
    }

    pub fn nb_playable_tiles(&self) -> usize {
        NB_PLAYABLE_TILES
    }

    pub fn get(&self, tile: Tile) -> Option<Piece> {
        if is_playable_tile(tile) {
            self.cells[tile - 1]
        } else {
            None
        }
    }

    pub fn is_empty(&self, tile: Tile) -> bool {
        is_playable_tile(tile) && self.cells[tile - 1].is_none()
    }

    pub fn set(&mut self, tile: Tile, piece: Piece) {
        if is_playable_tile(tile) {
            self.cells[tile - 1] = Some(piece);
        }
    }

    pub fn remove(&mut self, tile: Tile) -> Option<Piece> {
        if is_playable_tile(tile) {
            self.cells[tile - 1].take()
        } else {
            None
        }
    }

    /// Move the piece at `from` onto `to`. Does nothing when `from` is empty.
    pub fn relocate(&mut self, from: Tile, to: Tile) {
        if let Some(piece) = self.remove(from) {
            self.set(to, piece);
        }
    }

    /// Promote the piece at `tile` to king.
    pub fn crown(&mut self, tile: Tile) {
        if let Some(piece) = self.get(tile) {
            self.set(tile, Piece::king(piece.color));
        }
    }

    /// Tiles currently holding a piece of `color`, in ascending order.
    pub fn tiles_of(&self, color: Color) -> Vec<Tile> {
        (1..=NB_PLAYABLE_TILES)
            .filter(|&tile| matches!(self.cells[tile - 1], Some(p) if p.color == color))
            .collect()
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().flatten().filter(|p| p.color == color).count()
    }

    pub fn has_pieces(&self, color: Color) -> bool {
        self.cells.iter().flatten().any(|p| p.color == color)
    }
}

impl fmt::Display for CheckerBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                // Dark squares are the ones where row and column parity differ
                let ch = if (row + col) % 2 == 1 {
                    let tile = row * ROW_LEN + col / 2 + 1;
                    match self.cells[tile - 1] {
                        Some(piece) => piece.symbol(),
                        None => '.',
                    }
                } else {
                    ' '
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
