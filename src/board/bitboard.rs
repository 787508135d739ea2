//! Bitboard over the 36 squares, used for occupancy and visited sets

use super::{Pos, TOTAL_CELLS};

/// Set of squares packed into the low 36 bits of a `u64`.
///
/// The type is `Copy`, so a search branch that extends a visited set works on
/// its own value and never disturbs its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Bitboard containing a single square
    #[inline]
    pub fn from_pos(pos: Pos) -> Self {
        Self {
            bits: 1u64 << pos.to_index(),
        }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= 1u64 << pos.to_index();
    }

    /// Copy of this set with `pos` added
    #[inline]
    #[must_use]
    pub fn with(self, pos: Pos) -> Self {
        Self {
            bits: self.bits | 1u64 << pos.to_index(),
        }
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        (self.bits >> pos.to_index()) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        debug_assert!(idx < TOTAL_CELLS);
        Some(Pos::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut bb = Bitboard::new();
        let pos = Pos::new(3, 4);
        assert!(!bb.get(pos));
        bb.set(pos);
        assert!(bb.get(pos));
        assert_eq!(bb.count(), 1);
        assert!(!bb.is_empty());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = Bitboard::from_pos(Pos::new(0, 0));
        let branch = base.with(Pos::new(0, 1));
        assert!(!base.get(Pos::new(0, 1)));
        assert!(branch.get(Pos::new(0, 1)));
        assert!(branch.get(Pos::new(0, 0)));
    }

    #[test]
    fn test_iter_ones_row_major() {
        let mut bb = Bitboard::new();
        bb.set(Pos::new(5, 5));
        bb.set(Pos::new(0, 2));
        bb.set(Pos::new(2, 0));
        let got: Vec<Pos> = bb.iter_ones().collect();
        assert_eq!(got, vec![Pos::new(0, 2), Pos::new(2, 0), Pos::new(5, 5)]);
    }
}
