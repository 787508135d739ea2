//! Zobrist hashing for position identification
//!
//! A position key covers everything that changes the set of legal moves:
//! piece placement, side to move and the cross-turn constraint.
//!
//! # Example
//!
//! ```
//! use escampe::board::{Board, Move, Side};
//! use escampe::search::ZobristTable;
//!
//! let zt = ZobristTable::default();
//! let mut board = Board::new();
//! let empty = zt.hash(&board, Side::Black);
//!
//! board.apply(&"F6/E6/F5/C5/D5/B5".parse::<Move>().unwrap(), Side::Black);
//! assert_ne!(zt.hash(&board, Side::White), empty);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Cell, Pos, Side, TOTAL_CELLS};

/// Seed used by [`ZobristTable::default`]
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Zobrist hash table for position hashing.
///
/// Unicorns get their own per-square keys, distinct from paladins, so a
/// unicorn move changes the key just like a paladin move does.
pub struct ZobristTable {
    /// `[side][square]` keys for paladins
    paladins: [[u64; TOTAL_CELLS]; 2],
    /// `[side][square]` keys for unicorns
    unicorns: [[u64; TOTAL_CELLS]; 2],
    /// XORed when White is to move
    white_to_move: u64,
    /// Keys for the constraint: index 0 = unset, 1..=3 = border value
    constraint: [u64; 4],
}

impl ZobristTable {
    /// Create a table from a seed; equal seeds give equal tables.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut paladins = [[0u64; TOTAL_CELLS]; 2];
        let mut unicorns = [[0u64; TOTAL_CELLS]; 2];
        for side in 0..2 {
            for idx in 0..TOTAL_CELLS {
                paladins[side][idx] = rng.random();
                unicorns[side][idx] = rng.random();
            }
        }

        let white_to_move = rng.random();
        let constraint = [rng.random(), rng.random(), rng.random(), rng.random()];

        Self {
            paladins,
            unicorns,
            white_to_move,
            constraint,
        }
    }

    /// Key of a single piece on a square (0 for an empty square).
    #[inline]
    #[must_use]
    pub fn piece_key(&self, pos: Pos, cell: Cell) -> u64 {
        let idx = pos.to_index();
        match cell {
            Cell::Empty => 0,
            Cell::Paladin(side) => self.paladins[side.index()][idx],
            Cell::Unicorn(side) => self.unicorns[side.index()][idx],
        }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Side) -> u64 {
        let mut h = Pos::all().fold(0u64, |h, pos| h ^ self.piece_key(pos, board.get(pos)));

        if side_to_move == Side::White {
            h ^= self.white_to_move;
        }
        h ^= self.constraint[usize::from(board.constraint().unwrap_or(0))];

        h
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}
