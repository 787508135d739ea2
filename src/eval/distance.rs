//! Distances between squares used by the evaluation

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, Pos};

/// How the evaluation measures paladin-to-unicorn distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Shortest orthogonal path through empty squares
    #[default]
    Bfs,
    /// Plain Manhattan distance, ignoring pieces
    Manhattan,
}

impl DistanceMetric {
    /// Distance from `from` to `to`, or `None` when `to` cannot be reached.
    pub fn distance(self, board: &Board, from: Pos, to: Pos) -> Option<u32> {
        match self {
            DistanceMetric::Bfs => bfs_distance(board, from, to),
            DistanceMetric::Manhattan => Some(u32::from(from.manhattan(to))),
        }
    }
}

/// Breadth-first distance over empty squares.
///
/// Intermediate squares must be empty; the target itself may be occupied,
/// since it normally holds the unicorn being measured against.
pub fn bfs_distance(board: &Board, from: Pos, to: Pos) -> Option<u32> {
    if from == to {
        return Some(0);
    }

    let mut visited = Bitboard::from_pos(from);
    let mut queue = VecDeque::from([(from, 0u32)]);

    while let Some((current, dist)) = queue.pop_front() {
        for next in current.neighbors() {
            if next == to {
                return Some(dist + 1);
            }
            if visited.get(next) || !board.is_empty(next) {
                continue;
            }
            visited.set(next);
            queue.push_back((next, dist + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Side};

    #[test]
    fn test_bfs_open_board_matches_manhattan() {
        let mut board = Board::new();
        board.set(Pos::new(5, 5), Cell::Unicorn(Side::Black));
        let from = Pos::new(0, 0);
        let to = Pos::new(5, 5);
        assert_eq!(bfs_distance(&board, from, to), Some(10));
        assert_eq!(DistanceMetric::Manhattan.distance(&board, from, to), Some(10));
    }

    #[test]
    fn test_bfs_detours_and_walls() {
        let mut board = Board::new();
        let from = Pos::new(0, 0);
        let to = Pos::new(0, 2);
        board.set(to, Cell::Unicorn(Side::White));
        board.set(Pos::new(0, 1), Cell::Paladin(Side::Black));
        // Around through row 1
        assert_eq!(bfs_distance(&board, from, to), Some(4));

        board.set(Pos::new(1, 0), Cell::Paladin(Side::Black));
        assert_eq!(bfs_distance(&board, from, to), None);
        // Manhattan ignores the wall
        assert_eq!(DistanceMetric::Manhattan.distance(&board, from, to), Some(2));
    }

    #[test]
    fn test_bfs_adjacent_occupied_target() {
        let mut board = Board::new();
        board.set(Pos::new(2, 3), Cell::Unicorn(Side::White));
        assert_eq!(bfs_distance(&board, Pos::new(2, 2), Pos::new(2, 3)), Some(1));
        assert_eq!(bfs_distance(&board, Pos::new(2, 2), Pos::new(2, 2)), Some(0));
    }
}
