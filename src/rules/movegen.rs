//! Move generation
//!
//! Candidate destinations are exactly the squares at Manhattan distance
//! equal to the source's border value; each one is confirmed by the path
//! search.

use crate::board::{Board, Move, Pos, Side};

use super::legality::is_legal_step;

/// Squares at exact Manhattan distance `dist` from `from`, in index order.
fn ring(from: Pos, dist: u8) -> impl Iterator<Item = Pos> {
    Pos::all().filter(move |&to| from.manhattan(to) == dist)
}

/// Destinations of the piece on `from` that are legal for `side`.
pub fn destinations(board: &Board, from: Pos, side: Side) -> Vec<Pos> {
    if board.get(from).owner() != Some(side) || !board.satisfies_constraint(from) {
        return Vec::new();
    }
    ring(from, board.border(from))
        .filter(|&to| is_legal_step(board, from, to, side))
        .collect()
}

/// All legal regular moves for `side`.
pub fn generate_steps(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces(side).iter_ones() {
        for to in destinations(board, from, side) {
            moves.push(Move::step(from, to));
        }
    }
    moves
}

/// Whether `side` has at least one regular move.
pub fn has_any_step(board: &Board, side: Side) -> bool {
    board.pieces(side).iter_ones().any(|from| {
        board.satisfies_constraint(from)
            && ring(from, board.border(from)).any(|to| is_legal_step(board, from, to, side))
    })
}

/// Legal moves for `side` once both sides have placed: the regular moves,
/// or a single pass when there are none. Empty before that.
pub fn generate_moves(board: &Board, side: Side) -> Vec<Move> {
    if !board.placements_done() {
        return Vec::new();
    }
    let steps = generate_steps(board, side);
    if steps.is_empty() {
        vec![Move::Pass]
    } else {
        steps
    }
}
