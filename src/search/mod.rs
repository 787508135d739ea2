//! Search module for the Escampe agent
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{select_best, SearchResult, SearchStats, Searcher};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
