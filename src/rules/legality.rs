//! Move legality
//!
//! - Nothing but placements until both sides have placed.
//! - Pass: legal only when the side has no regular move.
//! - Placement: legal only while the side has not placed, for exactly six
//!   distinct empty squares inside the side's band. Black picks either band,
//!   White takes the band opposite to Black's and may not place first.
//! - Regular move: own piece, constraint satisfied, Manhattan distance equal
//!   to the source's border value, and a valid path.

use std::collections::HashSet;

use crate::board::{Band, Board, Move, Pos, Side};

use super::movegen::has_any_step;
use super::path::has_valid_path;

/// Check whether `mv` is legal for `side` on `board`.
pub fn is_legal(board: &Board, mv: &Move, side: Side) -> bool {
    match mv {
        Move::Pass => is_legal_pass(board, side),
        Move::Placement(squares) => is_legal_placement(board, squares, side),
        Move::Step { from, to } => board.placements_done() && is_legal_step(board, *from, *to, side),
    }
}

/// A pass is forced, and only allowed, when no regular move exists.
pub fn is_legal_pass(board: &Board, side: Side) -> bool {
    board.placements_done() && !has_any_step(board, side)
}

/// Regular-move legality on the current position, without the phase check
/// of [`is_legal`].
pub fn is_legal_step(board: &Board, from: Pos, to: Pos, side: Side) -> bool {
    if board.get(from).owner() != Some(side) {
        return false;
    }
    if !board.satisfies_constraint(from) {
        return false;
    }
    let steps = board.border(from);
    if from.manhattan(to) != steps {
        return false;
    }
    has_valid_path(board, from, to, steps)
}

/// Placement legality.
pub fn is_legal_placement(board: &Board, squares: &[Pos], side: Side) -> bool {
    if board.has_placed(side) {
        return false;
    }
    let distinct: HashSet<Pos> = squares.iter().copied().collect();
    if squares.len() != crate::board::moves::PLACEMENT_SIZE || distinct.len() != squares.len() {
        return false;
    }
    if !squares.iter().all(|&pos| board.is_empty(pos)) {
        return false;
    }

    let in_band = |band: Band| squares.iter().all(|&pos| band.contains(pos));
    match side {
        Side::Black => in_band(Band::Top) || in_band(Band::Bottom),
        Side::White => board.placement_band(Side::White).is_some_and(in_band),
    }
}

/// Whether `side` can capture the opposing unicorn with its next move.
///
/// Also true when the opposing unicorn is already gone.
pub fn can_capture_unicorn(board: &Board, side: Side) -> bool {
    let Some(target) = board.unicorn(side.opponent()) else {
        return true;
    };
    board
        .paladins(side)
        .iter_ones()
        .any(|from| is_legal_step(board, from, target, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn placed_board() -> Board {
        let mut board = Board::new();
        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        board.apply(&"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White);
        board
    }

    #[test]
    fn test_black_may_choose_either_band() {
        let board = Board::new();
        assert!(is_legal(&board, &"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black));
        assert!(is_legal(&board, &"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::Black));
        // Straddles both bands
        assert!(!is_legal(&board, &"F1/A2/C2/E2/F2/D6".parse().unwrap(), Side::Black));
        // Middle rows
        assert!(!is_legal(&board, &"A3/B3/C3/D3/E3/F4".parse().unwrap(), Side::Black));
    }

    #[test]
    fn test_white_places_opposite_black() {
        let mut board = Board::new();
        // White cannot go first
        assert!(!is_legal(&board, &"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White));

        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        assert!(is_legal(&board, &"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White));
        assert!(!is_legal(&board, &"A6/B6/C6/D6/A5/E5".parse().unwrap(), Side::White));
    }

    #[test]
    fn test_placement_rejects_duplicates_and_occupied() {
        let mut board = Board::new();
        assert!(!is_legal(&board, &"A1/A1/B1/C1/D1/E1".parse().unwrap(), Side::Black));

        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        // Black cannot place twice
        assert!(!is_legal(&board, &"A1/B1/C1/D1/E1/F1".parse().unwrap(), Side::Black));
    }

    #[test]
    fn test_step_requires_exact_distance() {
        let board = placed_board();
        // F2 has border 2: two squares down through F3 to F4
        assert!(is_legal(&board, &"F2-F4".parse().unwrap(), Side::White));
        // D2 has border 1: same shape is a distance mismatch
        assert!(!is_legal(&board, &"D2-D4".parse().unwrap(), Side::White));
        // Not White's piece
        assert!(!is_legal(&board, &"F5-F3".parse().unwrap(), Side::White));
        // Shorter than the step count, even with an open path
        assert!(!is_legal(&board, &"F2-F3".parse().unwrap(), Side::White));
    }

    #[test]
    fn test_step_respects_constraint() {
        let mut board = placed_board();
        board.set_constraint(Some(1));
        // F2 stands on border 2
        assert!(!is_legal(&board, &"F2-F4".parse().unwrap(), Side::White));
        // D2 stands on border 1
        assert!(is_legal(&board, &"D2-D3".parse().unwrap(), Side::White));
    }

    #[test]
    fn test_pass_only_without_moves() {
        let mut board = placed_board();
        assert!(!is_legal(&board, &Move::Pass, Side::White));

        // Lone unicorn on a border-1 square facing a border-2 constraint
        for pos in board.pieces(Side::White).iter_ones() {
            board.set(pos, Cell::Empty);
        }
        board.set(Pos::new(0, 0), Cell::Unicorn(Side::White)); // border 1
        board.set_constraint(Some(2));
        assert!(is_legal(&board, &Move::Pass, Side::White));
    }

    #[test]
    fn test_no_regular_move_before_white_places() {
        let mut board = Board::new();
        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        // Geometrically fine: B5 (border 3) to B2 down an empty column
        assert!(is_legal_step(&board, Pos::new(4, 1), Pos::new(1, 1), Side::Black));
        assert!(!is_legal(&board, &"B5-B2".parse().unwrap(), Side::Black));
        assert!(!is_legal(&board, &Move::Pass, Side::Black));

        board.apply(&"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White);
        assert!(is_legal(&board, &"B5-B2".parse().unwrap(), Side::Black));
    }

    #[test]
    fn test_paladin_captures_unicorn_only() {
        let board: Board = "\
01 n-b--- 01
02 ------ 02
03 --N--- 03
04 ------ 04
05 ------ 05
06 -----B 06
"
        .parse()
        .unwrap();
        assert!(is_legal(&board, &"C1-C3".parse().unwrap(), Side::White));
        assert!(!is_legal(&board, &"C1-A1".parse().unwrap(), Side::White));
        assert!(can_capture_unicorn(&board, Side::White));
        assert!(!can_capture_unicorn(&board, Side::Black));
    }
}
