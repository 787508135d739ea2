//! Agent configuration
//!
//! Every policy choice of the agent lives here: search depths per phase,
//! table size, tie-breaking, the distance metric of the evaluation and its
//! weights. Configurations load from JSON; missing fields take defaults.
//!
//! ```
//! use escampe::{AgentConfig, config::TieBreak};
//!
//! let config = AgentConfig::from_json_str(r#"{ "search_depth": 4, "tie_break": "first" }"#).unwrap();
//! assert_eq!(config.search_depth, 4);
//! assert_eq!(config.tie_break, TieBreak::First);
//! assert_eq!(config.placement_depth, 4);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Move;
use crate::error::{Error, Result};
use crate::eval::EvalWeights;

pub use crate::eval::DistanceMetric;

/// Deepest search the recursive minimax accepts
pub const MAX_SEARCH_DEPTH: u8 = 32;

/// Black's opening placement unless configured otherwise
pub const DEFAULT_BLACK_OPENING: &str = "F6/E6/F5/C5/D5/B5";

/// How to choose among equally scored root moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// First best move in generation order
    First,
    /// Uniformly random among the best moves, from the seeded RNG
    #[default]
    Random,
}

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// In-game search depth, counting the root ply
    pub search_depth: u8,
    /// Depth used to score each placement candidate
    pub placement_depth: u8,
    /// Random placement candidates tried besides the curated ones
    pub placement_samples: usize,
    /// Transposition table size in megabytes
    pub tt_size_mb: usize,
    pub use_transposition_table: bool,
    /// Seed of the tie-break and sampling RNG
    pub seed: u64,
    /// Seed of the Zobrist key generator
    pub zobrist_seed: u64,
    pub tie_break: TieBreak,
    pub distance_metric: DistanceMetric,
    /// Optional per-move deadline in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Placement played when this agent is Black
    pub black_opening: String,
    pub weights: EvalWeights,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            search_depth: 6,
            placement_depth: 4,
            placement_samples: 500,
            tt_size_mb: 16,
            use_transposition_table: true,
            seed: 0x5EED,
            zobrist_seed: crate::search::zobrist::DEFAULT_ZOBRIST_SEED,
            tie_break: TieBreak::Random,
            distance_metric: DistanceMetric::Bfs,
            time_limit_ms: None,
            black_opening: DEFAULT_BLACK_OPENING.to_string(),
            weights: EvalWeights::default(),
        }
    }
}

impl AgentConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    ///
    /// Depths must lie in `1..=MAX_SEARCH_DEPTH`; deeper searches are
    /// reported as [`Error::DepthLimit`] rather than attempted.
    pub fn validate(&self) -> Result<()> {
        for depth in [self.search_depth, self.placement_depth] {
            if depth == 0 {
                return Err(Error::InvalidConfig("search depths must be at least 1".to_string()));
            }
            if depth > MAX_SEARCH_DEPTH {
                return Err(Error::DepthLimit {
                    depth,
                    max: MAX_SEARCH_DEPTH,
                });
            }
        }
        match self.black_opening.parse::<Move>() {
            Ok(Move::Placement(_)) => {}
            Ok(other) => {
                return Err(Error::InvalidConfig(format!(
                    "black_opening must be a placement, got {other}"
                )));
            }
            Err(e) => return Err(Error::InvalidConfig(format!("black_opening: {e}"))),
        }
        if self.weights.danger_border > 3 {
            return Err(Error::InvalidConfig("danger_border must be at most 3".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search_depth, 6);
        assert_eq!(config.tie_break, TieBreak::Random);
        assert_eq!(config.distance_metric, DistanceMetric::Bfs);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AgentConfig::from_json_str(
            r#"{ "placement_samples": 10, "distance_metric": "manhattan", "weights": { "attack": 80 } }"#,
        )
        .unwrap();
        assert_eq!(config.placement_samples, 10);
        assert_eq!(config.distance_metric, DistanceMetric::Manhattan);
        assert_eq!(config.weights.attack, 80);
        assert_eq!(config.weights.defense, 30);
        assert_eq!(config.search_depth, 6);
    }

    #[test]
    fn test_depth_limits() {
        let err = AgentConfig::from_json_str(r#"{ "search_depth": 40 }"#).unwrap_err();
        assert!(matches!(err, Error::DepthLimit { depth: 40, max: MAX_SEARCH_DEPTH }));
        assert!(!err.is_rules_violation());

        let err = AgentConfig::from_json_str(r#"{ "placement_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_opening_and_json() {
        let err = AgentConfig::from_json_str(r#"{ "black_opening": "A1-B1" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = AgentConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AgentConfig {
            time_limit_ms: Some(250),
            ..AgentConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(AgentConfig::from_json_str(&json).unwrap(), config);
    }
}
