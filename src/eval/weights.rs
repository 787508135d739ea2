//! Tunable weights of the heuristic evaluation

use serde::{Deserialize, Serialize};

/// Weights of the linear evaluation terms.
///
/// Only the sign and relative size of each term matter; the defaults are the
/// tested tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per legal move of difference between the two sides
    pub mobility: i32,
    /// Numerator of the `attack / (d + 1)` closeness bonus, own paladins to the enemy unicorn
    pub attack: i32,
    /// Numerator of the `defense / (d + 1)` closeness penalty, enemy paladins to the own unicorn
    pub defense: i32,
    /// Enemy paladin distance at or below which the own unicorn is in danger
    pub danger_distance: u32,
    /// Minimum border value of the unicorn's square for the danger penalty
    pub danger_border: u8,
    /// Penalty applied when the own unicorn is in danger
    pub danger_penalty: i32,
    /// Per border point under an own paladin
    pub border: i32,
    /// Per border point of each own destination matching the active constraint
    pub forward: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            mobility: 1,
            attack: 50,
            defense: 30,
            danger_distance: 2,
            danger_border: 3,
            danger_penalty: 40,
            border: 3,
            forward: 2,
        }
    }
}
