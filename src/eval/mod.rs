//! Evaluation module for Escampe positions
//!
//! The evaluation considers:
//! - Unicorn capture threats (decisive)
//! - Mobility of both sides
//! - Paladin distances to both unicorns
//! - Border control and constraint-matching destinations

pub mod distance;
pub mod heuristic;
pub mod weights;

pub use distance::{bfs_distance, DistanceMetric};
pub use heuristic::{evaluate, Evaluator, LOSS, WIN};
pub use weights::EvalWeights;
