//! Error types for the Escampe engine
//!
//! Rules violations, notation problems and resource faults are kept apart so
//! the caller driving the game can tell a bad request from an engine limit.

use thiserror::Error;

use crate::board::Side;

/// Errors that can occur in the Escampe engine
#[derive(Error, Debug)]
pub enum Error {
    /// Move text could not be parsed into a position or move shape
    #[error("Malformed move notation {input:?}: {reason}")]
    MalformedNotation { input: String, reason: String },

    /// Well-formed move rejected by the rules
    #[error("Illegal move {notation} for {side}")]
    IllegalMove { notation: String, side: Side },

    /// The side has no regular move and must pass
    #[error("No legal move for {side}: the only legal move is a pass (E)")]
    NoLegalMove { side: Side },

    /// The side cannot act in the current phase (White placing before
    /// Black, or a regular move before both sides have placed)
    #[error("Not {side}'s turn to move")]
    OutOfTurn { side: Side },

    /// Board text could not be parsed
    #[error("Malformed board at line {line}: {reason}")]
    MalformedBoard { line: usize, reason: String },

    /// A Unicorn has been captured; no further moves are accepted
    #[error("Game is already over")]
    GameOver,

    /// Configured search depth exceeds what the recursive search supports
    #[error("Search depth {depth} exceeds the supported maximum of {max}")]
    DepthLimit { depth: u8, max: u8 },

    /// The deadline expired before any candidate move was scored
    #[error("Search deadline expired after {elapsed_ms}ms without a scored move")]
    SearchTimeout { elapsed_ms: u64 },

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration deserialization error
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedNotation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors that reject a move on rules grounds
    pub fn is_rules_violation(&self) -> bool {
        matches!(
            self,
            Error::MalformedNotation { .. }
                | Error::IllegalMove { .. }
                | Error::NoLegalMove { .. }
                | Error::OutOfTurn { .. }
        )
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
