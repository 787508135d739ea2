//! Heuristic evaluation function for Escampe positions
//!
//! Positions are scored from the perspective of one side:
//! - Win/loss detection (a unicorn capturable next move)
//! - Mobility differential
//! - Paladin proximity to the enemy unicorn, and enemy proximity to ours
//! - Border control under own paladins
//! - Destinations that keep satisfying the active constraint

use crate::board::{Board, Pos, Side};
use crate::rules::{can_capture_unicorn, generate_steps};

use super::distance::DistanceMetric;
use super::weights::EvalWeights;

/// Score of a position where the evaluated side captures next move
pub const WIN: i32 = i32::MAX - 1;
/// Score of a position where the opponent captures next move
pub const LOSS: i32 = i32::MIN + 1;

/// Weighted evaluator for leaf positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    pub weights: EvalWeights,
    pub metric: DistanceMetric,
}

impl Evaluator {
    #[must_use]
    pub fn new(weights: EvalWeights, metric: DistanceMetric) -> Self {
        Self { weights, metric }
    }

    /// Evaluate the board from the perspective of `side`.
    ///
    /// Returns [`WIN`] when `side` can capture the enemy unicorn with a
    /// single regular move (or it is already gone), [`LOSS`] when the
    /// opponent can, and a weighted sum of positional terms otherwise.
    #[must_use]
    pub fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let enemy = side.opponent();

        if can_capture_unicorn(board, side) {
            return WIN;
        }
        if can_capture_unicorn(board, enemy) {
            return LOSS;
        }

        // Both unicorns are on the board past the checks above
        let (Some(my_unicorn), Some(enemy_unicorn)) = (board.unicorn(side), board.unicorn(enemy)) else {
            return 0;
        };

        let w = &self.weights;
        let my_moves = generate_steps(board, side).len() as i32;
        let enemy_moves = generate_steps(board, enemy).len() as i32;

        let mobility = (my_moves - enemy_moves) * w.mobility;
        let attack = self.proximity(board, side, enemy_unicorn, w.attack);
        let defense = self.proximity(board, enemy, my_unicorn, w.defense);
        let danger = if self.in_danger(board, enemy, my_unicorn) {
            w.danger_penalty
        } else {
            0
        };
        let border: i32 = board
            .paladins(side)
            .iter_ones()
            .map(|pos| i32::from(board.border(pos)) * w.border)
            .sum();
        let forward = match board.constraint() {
            Some(c) => self.matching_destinations(board, side, c) * i32::from(c) * w.forward,
            None => 0,
        };

        mobility + attack - defense - danger + border + forward
    }

    /// Sum of `weight / (d + 1)` over the paladins of `side` measured to
    /// `target`; unreachable paladins add nothing.
    fn proximity(&self, board: &Board, side: Side, target: Pos, weight: i32) -> i32 {
        board
            .paladins(side)
            .iter_ones()
            .filter_map(|from| self.metric.distance(board, from, target))
            .map(|d| weight / (d as i32 + 1))
            .sum()
    }

    /// Own destinations landing on border `c`, counted as if no constraint
    /// were active.
    ///
    /// Under the constraint itself the count is always zero: no square of the
    /// overlay reaches another square of its own border value.
    fn matching_destinations(&self, board: &Board, side: Side, c: u8) -> i32 {
        let mut free = board.clone();
        free.set_constraint(None);
        generate_steps(&free, side)
            .iter()
            .filter_map(|mv| mv.destination())
            .filter(|&to| board.border(to) == c)
            .count() as i32
    }

    /// Nearest enemy paladin within the danger radius while the unicorn
    /// stands on a high border square.
    fn in_danger(&self, board: &Board, enemy: Side, unicorn: Pos) -> bool {
        let w = &self.weights;
        if board.border(unicorn) < w.danger_border {
            return false;
        }
        board
            .paladins(enemy)
            .iter_ones()
            .filter_map(|from| self.metric.distance(board, from, unicorn))
            .min()
            .is_some_and(|d| d <= w.danger_distance)
    }
}

/// Evaluate with the default weights and breadth-first distances.
#[must_use]
pub fn evaluate(board: &Board, side: Side) -> i32 {
    Evaluator::default().evaluate(board, side)
}
