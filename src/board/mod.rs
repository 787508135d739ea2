//! Board representation for Escampe

pub mod bitboard;
pub mod board;
pub mod moves;


use std::fmt;

use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Band, Board};
pub use moves::Move;

/// Board size (6x6)
pub const BOARD_SIZE: usize = 6;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 36

/// Border overlay: per-square step count in {1, 2, 3}
pub type Borders = [[u8; BOARD_SIZE]; BOARD_SIZE];

/// Fixed border layout used by every game instance.
pub static PRESET_BORDERS: Borders = [
    [1, 2, 2, 3, 1, 2],
    [3, 1, 3, 1, 3, 2],
    [2, 3, 1, 2, 1, 3],
    [2, 1, 3, 2, 3, 1],
    [1, 3, 1, 3, 1, 2],
    [3, 2, 2, 1, 3, 2],
];

/// Player sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Dense index for per-side tables (Black = 0, White = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

/// Content of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Paladin(Side),
    Unicorn(Side),
}

impl Cell {
    /// Owner of the piece, if any
    #[inline]
    pub fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Paladin(side) | Cell::Unicorn(side) => Some(side),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Board-file character: `-`, `N`/`B` unicorns, `n`/`b` paladins
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Unicorn(Side::Black) => 'N',
            Cell::Unicorn(Side::White) => 'B',
            Cell::Paladin(Side::Black) => 'n',
            Cell::Paladin(Side::White) => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'N' => Some(Cell::Unicorn(Side::Black)),
            'B' => Some(Cell::Unicorn(Side::White)),
            'n' => Some(Cell::Paladin(Side::Black)),
            'b' => Some(Cell::Paladin(Side::White)),
            _ => None,
        }
    }
}

/// Orthogonal directions, in the order the path search tries them
pub const DIRECTIONS: [(i8, i8); 4] = [
    (-1, 0), // Up
    (1, 0),  // Down
    (0, -1), // Left
    (0, 1),  // Right
];

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Manhattan distance to another square
    #[inline]
    pub fn manhattan(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Step one square in `dir`, or `None` when leaving the board
    #[inline]
    pub fn offset(self, (dr, dc): (i8, i8)) -> Option<Pos> {
        let r = i32::from(self.row) + i32::from(dr);
        let c = i32::from(self.col) + i32::from(dc);
        if Pos::is_valid(r, c) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Orthogonal neighbours that lie on the board
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        DIRECTIONS.into_iter().filter_map(move |dir| self.offset(dir))
    }

    /// Iterate over all 36 squares in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Square notation: column letter `A`-`F`, then 1-based row (`"B1"`)
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'A' + self.col), self.row + 1)
    }
}
