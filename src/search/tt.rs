//! Transposition Table for caching search results
//!
//! The table stores minimax values indexed by the Zobrist hash of the
//! position (including side to move and constraint), so a position reached
//! through different move orders is searched once per depth.
//!
//! # Example
//!
//! ```
//! use escampe::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 4, 120, EntryType::Exact, None);
//!
//! assert_eq!(tt.probe(hash, 4, -1000, 1000), Some(120));
//! // A deeper request cannot reuse the shallower result
//! assert_eq!(tt.probe(hash, 5, -1000, 1000), None);
//! ```
//!
//! Entries keep the full 64-bit key and are only used on an exact key match.
//! Two distinct positions sharing a key would be conflated; at 64 bits that
//! is accepted as negligible.

use crate::board::Move;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the value fell strictly inside the window
    Exact,
    /// Lower bound - true value >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - true value <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a fail-soft result against the window the node was entered with.
    #[inline]
    pub fn classify(value: i32, alpha: i32, beta: i32) -> Self {
        if value <= alpha {
            EntryType::UpperBound
        } else if value >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining depth the value was computed with
    pub depth: u8,
    /// Minimax value
    pub score: i32,
    /// How `score` relates to the true value
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

/// Transposition table for caching search results.
///
/// Direct-mapped: each hash maps to exactly one slot. The same position
/// always overwrites its slot; a different position takes the slot only
/// when searched at least as deep as the resident entry.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    ///
    /// The table always has at least 1024 slots.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Probe the table for a usable value.
    ///
    /// Returns the stored value when the entry matches `hash`, was searched
    /// to at least `depth`, and its bound settles the `(alpha, beta)` window:
    /// exact values always, lower bounds when `>= beta`, upper bounds when
    /// `<= alpha`.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries[self.slot(hash)]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }

        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Best move recorded for `hash`, used to order moves even when the
    /// stored value itself is not usable.
    #[must_use]
    pub fn get_best_move(&self, hash: u64) -> Option<Move> {
        self.entries[self.slot(hash)].and_then(|e| if e.hash == hash { e.best_move } else { None })
    }

    /// Store a search result.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, entry_type: EntryType, best_move: Option<Move>) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || depth >= e.depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
