//! Board structure with the border overlay and the cross-turn constraint

use std::fmt;
use std::str::FromStr;

use super::bitboard::Bitboard;
use super::moves::Move;
use super::{Borders, Cell, Pos, Side, BOARD_SIZE, PRESET_BORDERS, TOTAL_CELLS};
use crate::error::{Error, Result};

/// Two-row placement band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Rows 0-1 (notation rows 1-2)
    Top,
    /// Rows 4-5 (notation rows 5-6)
    Bottom,
}

impl Band {
    /// The two rows of this band
    #[inline]
    pub fn rows(self) -> [u8; 2] {
        match self {
            Band::Top => [0, 1],
            Band::Bottom => [4, 5],
        }
    }

    #[inline]
    pub fn contains(self, pos: Pos) -> bool {
        self.rows().contains(&pos.row)
    }

    #[inline]
    pub fn opposite(self) -> Band {
        match self {
            Band::Top => Band::Bottom,
            Band::Bottom => Band::Top,
        }
    }

    /// All twelve squares of the band
    pub fn squares(self) -> impl Iterator<Item = Pos> {
        self.rows()
            .into_iter()
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Pos::new(row, col)))
    }
}

/// Game board.
///
/// Cloning is cheap (a 36-byte grid, a reference to the shared border
/// overlay and the constraint), which is what the search relies on: each
/// explored branch owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; TOTAL_CELLS],
    /// Shared, immutable step counts
    borders: &'static Borders,
    /// Border value the next regular move must start from (`None` = free)
    constraint: Option<u8>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; TOTAL_CELLS],
            borders: &PRESET_BORDERS,
            constraint: None,
        }
    }

    /// Get content at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Overwrite a square (no rules processing)
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Step count of a square
    #[inline]
    pub fn border(&self, pos: Pos) -> u8 {
        self.borders[pos.row as usize][pos.col as usize]
    }

    /// Current cross-turn constraint
    #[inline]
    pub fn constraint(&self) -> Option<u8> {
        self.constraint
    }

    #[inline]
    pub fn set_constraint(&mut self, constraint: Option<u8>) {
        self.constraint = constraint;
    }

    /// Whether a piece standing on `pos` satisfies the constraint
    #[inline]
    pub fn satisfies_constraint(&self, pos: Pos) -> bool {
        self.constraint.map_or(true, |c| self.border(pos) == c)
    }

    /// Squares holding a piece of `side`
    pub fn pieces(&self, side: Side) -> Bitboard {
        let mut bb = Bitboard::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.owner() == Some(side) {
                bb.set(Pos::from_index(idx));
            }
        }
        bb
    }

    /// Squares holding a paladin of `side`
    pub fn paladins(&self, side: Side) -> Bitboard {
        let mut bb = Bitboard::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            if *cell == Cell::Paladin(side) {
                bb.set(Pos::from_index(idx));
            }
        }
        bb
    }

    /// Square of the unicorn of `side`, if still on the board
    pub fn unicorn(&self, side: Side) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&cell| cell == Cell::Unicorn(side))
            .map(Pos::from_index)
    }

    /// Number of pieces of `side`
    pub fn piece_count(&self, side: Side) -> u32 {
        self.pieces(side).count()
    }

    /// Total pieces on board
    pub fn total_pieces(&self) -> u32 {
        self.cells.iter().filter(|cell| !cell.is_empty()).count() as u32
    }

    /// Whether `side` has placed its pieces
    #[inline]
    pub fn has_placed(&self, side: Side) -> bool {
        self.cells.iter().any(|cell| cell.owner() == Some(side))
    }

    /// Both sides have placed; regular moves and passes start here
    #[inline]
    pub fn placements_done(&self) -> bool {
        self.has_placed(Side::Black) && self.has_placed(Side::White)
    }

    /// Band Black placed in, once Black has placed
    pub fn black_band(&self) -> Option<Band> {
        if !self.has_placed(Side::Black) {
            return None;
        }
        let top = Band::Top
            .squares()
            .any(|pos| self.get(pos).owner() == Some(Side::Black));
        Some(if top { Band::Top } else { Band::Bottom })
    }

    /// Band a side must place in, or `None` if it may not place yet.
    ///
    /// Black may pick either band, so `None` is also returned for Black;
    /// callers check Black against both bands.
    pub fn placement_band(&self, side: Side) -> Option<Band> {
        match side {
            Side::Black => None,
            Side::White => self.black_band().map(Band::opposite),
        }
    }

    /// Game is over once both sides have placed and a unicorn is missing
    pub fn is_game_over(&self) -> bool {
        self.placements_done()
            && (self.unicorn(Side::Black).is_none() || self.unicorn(Side::White).is_none())
    }

    /// Side whose unicorn is still standing when the other one is gone
    pub fn winner(&self) -> Option<Side> {
        if !self.is_game_over() {
            return None;
        }
        match (self.unicorn(Side::Black), self.unicorn(Side::White)) {
            (Some(_), None) => Some(Side::Black),
            (None, Some(_)) => Some(Side::White),
            _ => None,
        }
    }

    /// Apply a move without checking legality.
    ///
    /// A regular move sets the constraint to the destination's border value
    /// (capturing a unicorn by overwriting it); a pass clears the constraint;
    /// a placement leaves it untouched.
    pub fn apply(&mut self, mv: &Move, side: Side) {
        match *mv {
            Move::Placement(squares) => {
                self.set(squares[0], Cell::Unicorn(side));
                for &pos in &squares[1..] {
                    self.set(pos, Cell::Paladin(side));
                }
            }
            Move::Step { from, to } => {
                let piece = self.get(from);
                self.set(to, piece);
                self.set(from, Cell::Empty);
                self.constraint = Some(self.border(to));
            }
            Move::Pass => {
                self.constraint = None;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines of `"%02d <row> %02d"`, row 1 first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| self.get(Pos::new(row as u8, col as u8)).to_char())
                .collect();
            writeln!(f, "{:02} {} {:02}", row + 1, line, row + 1)?;
        }
        Ok(())
    }
}

/// Parses the board file format.
///
/// Lines starting with `%` are comments. Everything except letters and `-`
/// is dropped, and any line with at least six remaining characters supplies
/// the next row. The constraint is not stored in the format and starts unset.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut board = Board::new();
        let mut row = 0usize;

        for (line_no, line) in s.lines().enumerate() {
            if row == BOARD_SIZE {
                break;
            }
            if line.starts_with('%') {
                continue;
            }
            let clean: Vec<char> = line
                .chars()
                .filter(|c| c.is_ascii_alphabetic() || *c == '-')
                .collect();
            if clean.len() < BOARD_SIZE {
                continue;
            }
            for (col, &c) in clean.iter().take(BOARD_SIZE).enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| Error::MalformedBoard {
                    line: line_no + 1,
                    reason: format!("unknown piece {c:?}"),
                })?;
                board.set(Pos::new(row as u8, col as u8), cell);
            }
            row += 1;
        }

        if row < BOARD_SIZE {
            return Err(Error::MalformedBoard {
                line: s.lines().count(),
                reason: format!("expected {BOARD_SIZE} rows, found {row}"),
            });
        }

        for side in [Side::Black, Side::White] {
            if board.cells.iter().filter(|&&cell| cell == Cell::Unicorn(side)).count() > 1 {
                return Err(Error::MalformedBoard {
                    line: 0,
                    reason: format!("more than one {side} unicorn"),
                });
            }
        }

        Ok(board)
    }
}
