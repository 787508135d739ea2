//! Game rules for Escampe
//!
//! This module implements the rule set including:
//! - Path search along the border overlay
//! - Move legality (placement, regular moves, pass)
//! - Move generation under the cross-turn constraint
//! - Validated move application

pub mod legality;
pub mod movegen;
pub mod path;

use log::debug;

use crate::board::{Board, Move, Side};
use crate::error::{Error, Result};

// Re-exports for convenient access
pub use legality::{can_capture_unicorn, is_legal, is_legal_pass, is_legal_placement, is_legal_step};
pub use movegen::{destinations, generate_moves, generate_steps, has_any_step};
pub use path::{has_valid_path, is_end_pos_valid};

/// Validate `mv` for `side` and apply it.
///
/// The board is left untouched on error. A regular move from a side that
/// has none is reported as [`Error::NoLegalMove`] so the caller knows a
/// pass was expected.
pub fn play(board: &mut Board, mv: &Move, side: Side) -> Result<()> {
    if board.is_game_over() {
        return Err(Error::GameOver);
    }
    if is_legal(board, mv, side) {
        board.apply(mv, side);
        return Ok(());
    }

    let must_pass = !matches!(mv, Move::Pass | Move::Placement(_)) && is_legal_pass(board, side);
    debug!("Rejected {mv} for {side} (must pass: {must_pass})");
    if must_pass {
        Err(Error::NoLegalMove { side })
    } else {
        Err(Error::IllegalMove {
            notation: mv.to_string(),
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Pos};

    #[test]
    fn test_play_rejects_without_mutation() {
        let mut board = Board::new();
        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        board.apply(&"F1/A2/C2/E2/F2/D2".parse().unwrap(), Side::White);
        let before = board.clone();

        let err = play(&mut board, &"D2-D4".parse().unwrap(), Side::White).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { side: Side::White, .. }));
        assert_eq!(board, before);

        let err = play(&mut board, &Move::Pass, Side::White).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));

        play(&mut board, &"F2-F4".parse().unwrap(), Side::White).unwrap();
        assert_eq!(board.constraint(), Some(1));
    }

    #[test]
    fn test_play_rejects_steps_before_both_placements() {
        let mut board = Board::new();
        board.apply(&"F6/E6/F5/C5/D5/B5".parse().unwrap(), Side::Black);
        let before = board.clone();

        let err = play(&mut board, &"B5-B2".parse().unwrap(), Side::Black).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { side: Side::Black, .. }));
        let err = play(&mut board, &Move::Pass, Side::Black).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
        assert_eq!(board, before);
        assert_eq!(board.placement_band(Side::White), Some(crate::board::Band::Top));
    }

    #[test]
    fn test_play_reports_forced_pass() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::Unicorn(Side::White));
        board.set(Pos::new(5, 5), Cell::Unicorn(Side::Black));
        board.set_constraint(Some(3));

        let err = play(&mut board, &"A1-B1".parse().unwrap(), Side::White).unwrap_err();
        assert!(matches!(err, Error::NoLegalMove { side: Side::White }));

        play(&mut board, &Move::Pass, Side::White).unwrap();
        assert_eq!(board.constraint(), None);
    }

    #[test]
    fn test_play_after_capture() {
        let mut board: Board = "\
01 n-b--- 01
02 ------ 02
03 --N--- 03
04 ------ 04
05 ------ 05
06 -----B 06
"
        .parse()
        .unwrap();
        play(&mut board, &"C1-C3".parse().unwrap(), Side::White).unwrap();
        assert!(board.is_game_over());
        assert!(matches!(
            play(&mut board, &Move::Pass, Side::Black),
            Err(Error::GameOver)
        ));
    }
}
