//! The playing agent
//!
//! An [`Agent`] keeps its own copy of the game and talks to the outside
//! world through four operations: applying the opponent's move, producing
//! its own move, reporting whether the game is over, and receiving the
//! winner declaration. Moves cross this boundary in text notation.
//!
//! Move selection follows the game phase:
//!
//! 1. **Opening**: Black plays its configured placement
//! 2. **Placement**: White scores curated and random placements by search
//! 3. **Search**: regular moves by minimax with alpha-beta and table
//!
//! # Example
//!
//! ```
//! use escampe::{Agent, AgentConfig, Side};
//!
//! let config = AgentConfig {
//!     search_depth: 2,
//!     placement_depth: 1,
//!     placement_samples: 5,
//!     ..AgentConfig::default()
//! };
//! let mut black = Agent::new(Side::Black, config.clone()).unwrap();
//! let mut white = Agent::new(Side::White, config).unwrap();
//!
//! let opening = black.request_move().unwrap();
//! assert_eq!(opening, "F6/E6/F5/C5/D5/B5");
//! white.apply_opponent_move(&opening).unwrap();
//!
//! let reply = white.request_move().unwrap();
//! black.apply_opponent_move(&reply).unwrap();
//! assert_eq!(black.board(), white.board());
//! ```

use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Move, Side};
use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::placement;
use crate::rules::play;
use crate::search::{select_best, SearchStats, Searcher};

/// How the agent arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Fixed opening placement (Black)
    Opening,
    /// Best-scored placement candidate (White)
    Placement,
    /// Regular move from the alpha-beta search
    Search,
}

/// A move played by the agent, with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub mv: Move,
    /// Value of the move, absent for the fixed opening
    pub score: Option<i32>,
    pub decision: Decision,
    /// Time taken in milliseconds
    pub time_ms: u64,
    pub stats: SearchStats,
}

impl MoveResult {
    #[inline]
    fn opening(mv: Move) -> Self {
        Self {
            mv,
            score: None,
            decision: Decision::Opening,
            time_ms: 0,
            stats: SearchStats::default(),
        }
    }

    /// Move in text notation
    pub fn notation(&self) -> String {
        self.mv.to_string()
    }
}

/// Escampe playing agent for one side.
pub struct Agent {
    side: Side,
    board: Board,
    searcher: Searcher,
    config: AgentConfig,
    rng: StdRng,
}

impl Agent {
    /// Create an agent for `side` on an empty board.
    pub fn new(side: Side, config: AgentConfig) -> Result<Self> {
        Self::with_board(side, config, Board::new())
    }

    /// Create an agent resuming from an existing position.
    pub fn with_board(side: Side, config: AgentConfig, board: Board) -> Result<Self> {
        config.validate()?;
        info!(
            "Agent {side}: depth {}, placement depth {}, {} samples, TT {}MB",
            config.search_depth, config.placement_depth, config.placement_samples, config.tt_size_mb
        );
        Ok(Self {
            side,
            board,
            searcher: Searcher::from_config(&config),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Parse and apply the opponent's move.
    ///
    /// The move goes through the same legality checks as the agent's own
    /// moves; on error the board is unchanged.
    pub fn apply_opponent_move(&mut self, notation: &str) -> Result<()> {
        let opponent = self.side.opponent();
        let mv: Move = notation.parse()?;
        play(&mut self.board, &mv, opponent)?;
        info!("{opponent} plays {mv}");
        Ok(())
    }

    /// Choose a move, apply it to the agent's board and return its notation.
    pub fn request_move(&mut self) -> Result<String> {
        Ok(self.request_move_with_stats()?.notation())
    }

    /// Like [`Agent::request_move`], with score and search statistics.
    pub fn request_move_with_stats(&mut self) -> Result<MoveResult> {
        if self.board.is_game_over() {
            return Err(Error::GameOver);
        }

        let result = if self.board.placements_done() {
            self.search_move()?
        } else if self.board.has_placed(self.side) {
            return Err(Error::OutOfTurn { side: self.side });
        } else {
            match self.side {
                Side::Black => MoveResult::opening(self.config.black_opening.parse()?),
                Side::White => self.choose_placement()?,
            }
        };

        play(&mut self.board, &result.mv, self.side)?;
        match result.score {
            Some(score) => info!(
                "{} plays {} (score {score}, {} nodes, {}ms)",
                self.side, result.mv, result.stats.nodes, result.time_ms
            ),
            None => info!("{} plays {}", self.side, result.mv),
        }
        Ok(result)
    }

    fn search_move(&mut self) -> Result<MoveResult> {
        let result = self.searcher.best_move(
            &self.board,
            self.side,
            self.config.search_depth,
            self.config.tie_break,
            &mut self.rng,
        )?;
        if result.timed_out {
            warn!(
                "{} search at depth {} cut by the deadline after {} candidates",
                self.side, result.depth, result.scored
            );
        }
        Ok(MoveResult {
            mv: result.best_move,
            score: Some(result.score),
            decision: Decision::Search,
            time_ms: result.time_ms,
            stats: result.stats,
        })
    }

    /// Score placement candidates; White moves first afterwards, so each
    /// candidate is searched with White maximizing.
    fn choose_placement(&mut self) -> Result<MoveResult> {
        let start = Instant::now();
        let candidates = placement::candidates(
            &self.board,
            self.side,
            self.config.placement_samples,
            &mut self.rng,
        );
        if candidates.is_empty() {
            return Err(Error::OutOfTurn { side: self.side });
        }

        let scored = self.searcher.score_moves(
            &self.board,
            self.side,
            &candidates,
            self.config.placement_depth,
            true,
        )?;
        let Some((mv, score, tied)) = select_best(&scored, self.config.tie_break, &mut self.rng) else {
            return Err(Error::NoLegalMove { side: self.side });
        };
        info!(
            "{} placement: {} candidates scored, {tied} tied at {score}",
            self.side,
            scored.len()
        );

        Ok(MoveResult {
            mv,
            score: Some(score),
            decision: Decision::Placement,
            time_ms: start.elapsed().as_millis() as u64,
            stats: self.searcher.stats(),
        })
    }

    /// Whether a unicorn has been captured.
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Winner according to the agent's own board.
    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }

    /// Informational winner callback; does not touch the game state.
    pub fn declare_winner(&self, side: Side) {
        info!("Winner declared: {side}");
        if let Some(own) = self.board.winner() {
            if own != side {
                warn!("Declared winner {side} disagrees with board winner {own}");
            }
        }
    }
}
