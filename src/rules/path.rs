//! Path search for regular moves
//!
//! A piece on a square with border value `s` travels orthogonally, one
//! square per hop, for up to `s` hops. Intermediate squares must be empty and
//! may not repeat within a path; the square reached on the last allotted hop
//! must satisfy the end-square rule.

use crate::board::{Bitboard, Board, Cell, Pos};

/// End-square rule.
///
/// A unicorn may only land on an empty square. A paladin may land on an
/// empty square or on the opposing unicorn, capturing it. Nothing ever lands
/// on a paladin.
#[inline]
pub fn is_end_pos_valid(piece: Cell, end: Cell) -> bool {
    match piece {
        Cell::Unicorn(_) => end.is_empty(),
        Cell::Paladin(side) => end.is_empty() || end == Cell::Unicorn(side.opponent()),
        Cell::Empty => false,
    }
}

/// Whether the piece on `from` can reach `to` within `steps` hops.
///
/// The search succeeds as soon as the path reaches `to`.
pub fn has_valid_path(board: &Board, from: Pos, to: Pos, steps: u8) -> bool {
    let piece = board.get(from);
    if piece.is_empty() {
        return false;
    }
    walk(board, piece, from, to, steps, Bitboard::from_pos(from))
}

/// Depth-first walk. `visited` is passed by value so every branch sees only
/// the squares of its own path.
fn walk(board: &Board, piece: Cell, current: Pos, to: Pos, steps_left: u8, visited: Bitboard) -> bool {
    if current == to {
        return true;
    }
    if steps_left == 0 {
        return false;
    }

    for next in current.neighbors() {
        if visited.get(next) {
            continue;
        }
        let target = board.get(next);
        let passable = if steps_left > 1 {
            target.is_empty()
        } else {
            is_end_pos_valid(piece, target)
        };
        if passable && walk(board, piece, next, to, steps_left - 1, visited.with(next)) {
            return true;
        }
    }
    false
}
