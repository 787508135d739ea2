//! Minimax search with alpha-beta pruning and transposition table
//!
//! The search is a two-role minimax: values are always from the point of
//! view of one fixed side (the perspective), which maximizes, while the
//! opponent minimizes. Each explored branch owns a clone of the board.
//!
//! # Features
//!
//! - Fail-soft alpha-beta with cutoffs as soon as `beta <= alpha`
//! - Transposition table probes and stores at every interior node
//! - Table move tried first for better pruning
//! - Optional deadline that stops the remaining root candidates
//!
//! # Example
//!
//! ```
//! use escampe::board::{Board, Side};
//! use escampe::config::{AgentConfig, TieBreak};
//! use escampe::search::Searcher;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let board: Board = "\
//! 01 n-b--- 01
//! 02 ------ 02
//! 03 --N--- 03
//! 04 ------ 04
//! 05 ------ 05
//! 06 -----B 06
//! ".parse().unwrap();
//!
//! let mut searcher = Searcher::from_config(&AgentConfig::default());
//! let mut rng = StdRng::seed_from_u64(1);
//! let result = searcher.best_move(&board, Side::White, 2, TieBreak::First, &mut rng).unwrap();
//! assert_eq!(result.best_move.to_string(), "C1-C3");
//! ```

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;

use crate::board::{Board, Move, Side};
use crate::config::{AgentConfig, TieBreak};
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::rules::generate_moves;

use super::{EntryType, TTStats, TranspositionTable, ZobristTable};

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, leaves included
    pub nodes: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable value
    pub tt_hits: u64,
    /// Sibling expansions skipped by `beta <= alpha`
    pub cutoffs: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the chosen move and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move chosen among the best-scored candidates
    pub best_move: Move,
    /// Value of the chosen move
    pub score: i32,
    /// Depth of the search, counting the root ply
    pub depth: u8,
    /// Candidates that finished scoring
    pub scored: usize,
    /// Candidates sharing the best score
    pub tied: usize,
    /// Whether the deadline cut the root short
    pub timed_out: bool,
    /// Wall time in milliseconds
    pub time_ms: u64,
    pub stats: SearchStats,
}

/// Pick the best-scored move.
///
/// Ties go to the first candidate in order, or to a uniformly random one.
/// Returns the move, its score and the number of tied candidates.
pub fn select_best(scored: &[(Move, i32)], tie_break: TieBreak, rng: &mut StdRng) -> Option<(Move, i32, usize)> {
    let best = scored.iter().map(|&(_, score)| score).max()?;
    let top: Vec<Move> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(mv, _)| mv)
        .collect();

    let pick = match tie_break {
        TieBreak::First => top[0],
        TieBreak::Random => top[rng.random_range(0..top.len())],
    };
    Some((pick, best, top.len()))
}

/// Single-threaded searcher owning the Zobrist keys and the table.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    evaluator: Evaluator,
    use_tt: bool,
    time_limit: Option<Duration>,
    /// Side whose values the table currently holds
    perspective: Option<Side>,
    deadline: Option<Instant>,
    stopped: bool,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher with a table of `tt_size_mb` megabytes.
    #[must_use]
    pub fn new(tt_size_mb: usize, zobrist_seed: u64, evaluator: Evaluator) -> Self {
        Self {
            zobrist: ZobristTable::new(zobrist_seed),
            tt: TranspositionTable::new(tt_size_mb),
            evaluator,
            use_tt: true,
            time_limit: None,
            perspective: None,
            deadline: None,
            stopped: false,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        let mut searcher = Self::new(
            config.tt_size_mb,
            config.zobrist_seed,
            Evaluator::new(config.weights, config.distance_metric),
        );
        searcher.use_tt = config.use_transposition_table;
        searcher.time_limit = config.time_limit_ms.map(Duration::from_millis);
        searcher
    }

    pub fn set_use_tt(&mut self, enabled: bool) {
        self.use_tt = enabled;
    }

    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Statistics accumulated since the last root call.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Stored values only make sense for one perspective.
    fn set_perspective(&mut self, side: Side) {
        if self.perspective != Some(side) {
            self.tt.clear();
            self.perspective = Some(side);
        }
    }

    fn start_clock(&mut self) {
        self.stats = SearchStats::default();
        self.stopped = false;
        self.deadline = self.time_limit.map(|limit| Instant::now() + limit);
    }

    #[inline]
    fn check_deadline(&mut self) -> bool {
        if !self.stopped && self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.stopped = true;
        }
        self.stopped
    }

    /// Minimax value of `board` for `perspective`.
    ///
    /// `maximizing` tells whose turn it is: the perspective side's when
    /// true, the opponent's otherwise. No deadline applies.
    pub fn minimax(&mut self, board: &Board, perspective: Side, depth: u8, alpha: i32, beta: i32, maximizing: bool) -> i32 {
        self.set_perspective(perspective);
        self.stats = SearchStats::default();
        self.stopped = false;
        self.deadline = None;
        self.node(board, perspective, depth, alpha, beta, maximizing)
    }

    fn node(&mut self, board: &Board, perspective: Side, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.stats.nodes += 1;
        if self.stats.nodes & 255 == 0 && self.check_deadline() {
            return 0;
        }
        if self.stopped {
            return 0;
        }

        if depth == 0 || board.is_game_over() {
            return self.evaluator.evaluate(board, perspective);
        }

        let to_move = if maximizing { perspective } else { perspective.opponent() };
        let (alpha0, beta0) = (alpha, beta);
        let hash = self.zobrist.hash(board, to_move);

        if self.use_tt {
            self.stats.tt_probes += 1;
            if let Some(value) = self.tt.probe(hash, depth, alpha, beta) {
                self.stats.tt_hits += 1;
                return value;
            }
        }

        let mut moves = generate_moves(board, to_move);
        if self.use_tt {
            if let Some(tt_move) = self.tt.get_best_move(hash) {
                if let Some(idx) = moves.iter().position(|&mv| mv == tt_move) {
                    moves[..=idx].rotate_right(1);
                }
            }
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for (i, mv) in moves.iter().enumerate() {
            let mut child = board.clone();
            child.apply(mv, to_move);
            let value = self.node(&child, perspective, depth - 1, alpha, beta, !maximizing);
            if self.stopped {
                return 0;
            }

            if maximizing {
                if value > best {
                    best = value;
                    best_move = Some(*mv);
                }
                alpha = alpha.max(value);
            } else {
                if value < best {
                    best = value;
                    best_move = Some(*mv);
                }
                beta = beta.min(value);
            }

            if beta <= alpha {
                if i + 1 < moves.len() {
                    self.stats.cutoffs += 1;
                }
                break;
            }
        }

        if self.use_tt {
            let entry_type = EntryType::classify(best, alpha0, beta0);
            self.tt.store(hash, depth, best, entry_type, best_move);
        }
        best
    }

    /// Score each candidate move for `side`.
    ///
    /// Every candidate is applied to its own clone and searched with a full
    /// window to `depth` plies below it; `maximizing` is the role of the
    /// side moving next (`false` when the opponent replies, `true` when
    /// `side` moves again, as after White's placement). With a deadline,
    /// candidates not finished in time are dropped; if none finished,
    /// [`Error::SearchTimeout`] is returned.
    pub fn score_moves(
        &mut self,
        board: &Board,
        side: Side,
        moves: &[Move],
        depth: u8,
        maximizing: bool,
    ) -> Result<Vec<(Move, i32)>> {
        self.set_perspective(side);
        self.start_clock();
        let started = Instant::now();

        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            if self.check_deadline() {
                break;
            }
            let mut child = board.clone();
            child.apply(mv, side);
            let value = self.node(&child, side, depth, i32::MIN, i32::MAX, maximizing);
            if self.stopped {
                break;
            }
            debug!("{side} {mv}: {value}");
            scored.push((*mv, value));
        }

        if self.stopped {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if scored.is_empty() {
                return Err(Error::SearchTimeout { elapsed_ms });
            }
            warn!(
                "Deadline after {elapsed_ms}ms: {} of {} candidates scored",
                scored.len(),
                moves.len()
            );
        }
        Ok(scored)
    }

    /// Choose the move for `side` with a search of `depth` plies, the root
    /// ply included.
    pub fn best_move(
        &mut self,
        board: &Board,
        side: Side,
        depth: u8,
        tie_break: TieBreak,
        rng: &mut StdRng,
    ) -> Result<SearchResult> {
        if board.is_game_over() {
            return Err(Error::GameOver);
        }
        let start = Instant::now();
        let moves = generate_moves(board, side);
        let scored = self.score_moves(board, side, &moves, depth.saturating_sub(1), false)?;

        let Some((best_move, score, tied)) = select_best(&scored, tie_break, rng) else {
            return Err(Error::NoLegalMove { side });
        };
        let result = SearchResult {
            best_move,
            score,
            depth,
            scored: scored.len(),
            tied,
            timed_out: self.stopped,
            time_ms: start.elapsed().as_millis() as u64,
            stats: self.stats,
        };
        debug!(
            "Search depth {depth}: {} nodes, {} cutoffs, TT {:.1}% hits, {tied} tied",
            result.stats.nodes,
            result.stats.cutoffs,
            result.stats.tt_hit_rate()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Pos};
    use crate::eval::{LOSS, WIN};
    use rand::SeedableRng;

    fn searcher() -> Searcher {
        Searcher::from_config(&AgentConfig::default())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// White paladin on C1 two squares from the black unicorn on C3, the
    /// white unicorn boxed in on F6.
    fn capture_board() -> Board {
        let mut board = Board::new();
        board.set(Pos::new(0, 2), Cell::Paladin(Side::White));
        board.set(Pos::new(2, 2), Cell::Unicorn(Side::Black));
        board.set(Pos::new(5, 5), Cell::Unicorn(Side::White));
        board.set(Pos::new(4, 5), Cell::Paladin(Side::Black));
        board.set(Pos::new(5, 4), Cell::Paladin(Side::Black));
        board
    }

    fn opening_board() -> Board {
        let mut board = Board::new();
        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        board.apply(&"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White);
        board
    }

    #[test]
    fn test_search_finds_capture() {
        for depth in [1, 2] {
            let mut s = searcher();
            let result = s
                .best_move(&capture_board(), Side::White, depth, TieBreak::First, &mut rng())
                .unwrap();
            assert_eq!(result.best_move.to_string(), "C1-C3", "depth {depth}");
            assert_eq!(result.score, WIN);
            assert_eq!(result.tied, 1);
        }
    }

    #[test]
    fn test_minimax_terminal_and_leaf() {
        let mut s = searcher();
        let mut board = capture_board();
        let leaf = s.evaluator().evaluate(&board, Side::White);
        assert_eq!(s.minimax(&board, Side::White, 0, i32::MIN, i32::MAX, true), leaf);

        board.apply(&"C1-C3".parse().unwrap(), Side::White);
        assert!(board.is_game_over());
        assert_eq!(s.minimax(&board, Side::White, 5, i32::MIN, i32::MAX, false), WIN);
        assert_eq!(s.minimax(&board, Side::Black, 5, i32::MIN, i32::MAX, true), LOSS);
    }

    #[test]
    fn test_table_does_not_change_root_scores() {
        let board = opening_board();
        let moves = generate_moves(&board, Side::White);

        for depth in [3, 4] {
            let mut with_tt = searcher();
            let mut without_tt = searcher();
            without_tt.set_use_tt(false);

            let a = with_tt.score_moves(&board, Side::White, &moves, depth, false).unwrap();
            let b = without_tt.score_moves(&board, Side::White, &moves, depth, false).unwrap();
            assert_eq!(a, b, "depth {depth}");
            // Stored values were actually reused
            assert!(with_tt.stats().tt_hits > 0, "depth {depth}");
            assert_eq!(without_tt.stats().tt_probes, 0);
            assert!(with_tt.tt_stats().used > 0);
        }
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        // Full-window values at every root candidate equal a window-free search
        fn plain(eval: &Evaluator, board: &Board, persp: Side, depth: u8, maximizing: bool) -> i32 {
            if depth == 0 || board.is_game_over() {
                return eval.evaluate(board, persp);
            }
            let to_move = if maximizing { persp } else { persp.opponent() };
            let values = generate_moves(board, to_move).into_iter().map(|mv| {
                let mut child = board.clone();
                child.apply(&mv, to_move);
                plain(eval, &child, persp, depth - 1, !maximizing)
            });
            if maximizing {
                values.max().unwrap_or(i32::MIN)
            } else {
                values.min().unwrap_or(i32::MAX)
            }
        }

        let board = opening_board();
        let mut s = searcher();
        s.set_use_tt(false);
        let eval = *s.evaluator();
        for mv in generate_moves(&board, Side::White).into_iter().take(4) {
            let mut child = board.clone();
            child.apply(&mv, Side::White);
            let pruned = s.minimax(&child, Side::White, 2, i32::MIN, i32::MAX, false);
            assert_eq!(pruned, plain(&eval, &child, Side::White, 2, false), "{mv}");
        }
    }

    #[test]
    fn test_perspective_change_clears_table() {
        let board = opening_board();
        let mut s = searcher();
        let moves = generate_moves(&board, Side::White);
        s.score_moves(&board, Side::White, &moves, 1, false).unwrap();
        assert!(s.tt_stats().used > 0);

        let mut black_turn = board.clone();
        black_turn.apply(&moves[0], Side::White);
        s.score_moves(&black_turn, Side::Black, &[], 1, false).unwrap();
        assert_eq!(s.tt_stats().used, 0);
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let mut s = searcher();
        s.set_time_limit(Some(Duration::ZERO));
        let err = s
            .best_move(&opening_board(), Side::White, 3, TieBreak::First, &mut rng())
            .unwrap_err();
        assert!(matches!(err, Error::SearchTimeout { .. }));
        assert!(!err.is_rules_violation());
    }

    #[test]
    fn test_forced_pass_is_searched() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::Unicorn(Side::White));
        board.set(Pos::new(5, 5), Cell::Unicorn(Side::Black));
        board.set_constraint(Some(3));

        let mut s = searcher();
        let result = s.best_move(&board, Side::White, 3, TieBreak::First, &mut rng()).unwrap();
        assert_eq!(result.best_move, Move::Pass);
    }

    #[test]
    fn test_game_over_root() {
        let mut board = capture_board();
        board.apply(&"C1-C3".parse().unwrap(), Side::White);
        let err = searcher()
            .best_move(&board, Side::Black, 2, TieBreak::First, &mut rng())
            .unwrap_err();
        assert!(matches!(err, Error::GameOver));
    }

    #[test]
    fn test_select_best_tie_break() {
        let a = Move::step(Pos::new(0, 0), Pos::new(0, 1));
        let b = Move::step(Pos::new(1, 1), Pos::new(1, 2));
        let c = Move::step(Pos::new(2, 2), Pos::new(2, 3));
        let scored = [(a, 5), (b, 9), (c, 9)];

        let (mv, score, tied) = select_best(&scored, TieBreak::First, &mut rng()).unwrap();
        assert_eq!((mv, score, tied), (b, 9, 2));

        let mut r = rng();
        for _ in 0..20 {
            let (mv, _, _) = select_best(&scored, TieBreak::Random, &mut r).unwrap();
            assert!(mv == b || mv == c);
        }
        assert!(select_best(&[], TieBreak::First, &mut r).is_none());
    }
}
