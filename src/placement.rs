//! Placement-phase candidates
//!
//! A handful of known-good canonical placements per band, followed by random
//! placements of six distinct band squares (the first one holds the unicorn).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::board::moves::PLACEMENT_SIZE;
use crate::board::{Band, Board, Move, Pos, Side};
use crate::rules::is_legal_placement;

/// Canonical placements for the top band (rows 1-2)
pub const CURATED_TOP: [&str; 3] = ["F1/A2/C2/E2/F2/D2", "A1/B1/C2/D2/E2/F2", "B1/A2/C2/D2/F2/E2"];

/// Canonical placements for the bottom band (rows 5-6)
pub const CURATED_BOTTOM: [&str; 3] = ["F6/E6/F5/C5/D5/B5", "F6/D6/E5/C5/B5/F5", "E6/F6/D5/C5/E5/B5"];

pub fn curated(band: Band) -> Vec<Move> {
    let notations = match band {
        Band::Top => CURATED_TOP,
        Band::Bottom => CURATED_BOTTOM,
    };
    notations.iter().filter_map(|s| s.parse().ok()).collect()
}

/// Six distinct squares of `band` in random order.
pub fn random_placement(band: Band, rng: &mut StdRng) -> Move {
    let mut squares: Vec<Pos> = band.squares().collect();
    squares.shuffle(rng);

    let mut placement = [Pos::new(0, 0); PLACEMENT_SIZE];
    placement.copy_from_slice(&squares[..PLACEMENT_SIZE]);
    Move::Placement(placement)
}

/// Legal placement candidates for `side`: curated ones first, then
/// `samples` random ones.
///
/// Black may use either band; White only the band opposite Black's.
pub fn candidates(board: &Board, side: Side, samples: usize, rng: &mut StdRng) -> Vec<Move> {
    let bands = match board.placement_band(side) {
        Some(band) => vec![band],
        None if side == Side::Black => vec![Band::Bottom, Band::Top],
        None => return Vec::new(),
    };

    let mut moves: Vec<Move> = bands.iter().flat_map(|&band| curated(band)).collect();
    for i in 0..samples {
        moves.push(random_placement(bands[i % bands.len()], rng));
    }
    moves.retain(|mv| match mv {
        Move::Placement(squares) => is_legal_placement(board, squares, side),
        _ => false,
    });
    moves
}
