//! Escampe decision engine
//!
//! An autonomous agent for Escampe, a two-player abstract game on a 6x6
//! board:
//! - Every square carries a border value (1-3): the exact number of steps a
//!   piece standing there moves
//! - Paths run orthogonally through empty squares without revisiting one
//! - The border value of the last destination constrains which pieces the
//!   opponent may move next
//! - Capturing the opposing unicorn with a paladin wins
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, border overlay and move notation
//! - [`rules`]: Path search, legality, move generation
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Minimax with alpha-beta, Zobrist keys and transposition table
//! - [`engine`]: The [`Agent`] talking to the referee
//!
//! # Quick Start
//!
//! ```
//! use escampe::{Agent, AgentConfig, Side};
//!
//! let config = AgentConfig {
//!     search_depth: 2,
//!     placement_depth: 1,
//!     placement_samples: 4,
//!     ..AgentConfig::default()
//! };
//! let mut agent = Agent::new(Side::White, config).unwrap();
//!
//! agent.apply_opponent_move("F6/E6/F5/C5/D5/B5").unwrap();
//! let placement = agent.request_move().unwrap();
//! println!("White places {placement}");
//! assert!(!agent.is_game_over());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod placement;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Move, Pos, Side, BOARD_SIZE};
pub use config::AgentConfig;
pub use engine::{Agent, Decision, MoveResult};
pub use error::{Error, Result};
