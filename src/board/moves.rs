//! Move type and the textual move notation
//!
//! Notation, kept bit-exact with existing referees:
//! - regular move: `"B1-D1"` (column `A`-`F`, 1-based row `1`-`6`)
//! - placement: `"C6/A6/B5/D5/E6/F5"` (unicorn first, then five paladins)
//! - pass: `"E"`

use std::fmt;
use std::str::FromStr;

use super::Pos;
use crate::error::{Error, Result};

/// Number of pieces each side places
pub const PLACEMENT_SIZE: usize = 6;

/// A single decision by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Initial placement: `[unicorn, paladin x5]`
    Placement([Pos; PLACEMENT_SIZE]),
    /// Regular move of one piece
    Step { from: Pos, to: Pos },
    /// Pass, only legal when no regular move exists
    Pass,
}

impl Move {
    #[inline]
    pub fn step(from: Pos, to: Pos) -> Self {
        Move::Step { from, to }
    }

    /// Destination of a regular move
    #[inline]
    pub fn destination(&self) -> Option<Pos> {
        match self {
            Move::Step { to, .. } => Some(*to),
            _ => None,
        }
    }
}

/// Parse a single square such as `"B1"`.
pub fn parse_pos(s: &str) -> Result<Pos> {
    let mut chars = s.chars();
    let col_char = chars
        .next()
        .ok_or_else(|| Error::malformed(s, "empty square"))?;
    if !('A'..='F').contains(&col_char) {
        return Err(Error::malformed(s, "column must be A-F"));
    }
    let row = match chars.as_str().as_bytes() {
        [digit @ b'1'..=b'6'] => digit - b'1',
        _ => return Err(Error::malformed(s, "row must be a single digit 1-6")),
    };
    let col = col_char as u8 - b'A';
    Ok(Pos::new(row, col))
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "E" {
            return Ok(Move::Pass);
        }

        if s.contains('/') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != PLACEMENT_SIZE {
                return Err(Error::malformed(s, "placement needs exactly six squares"));
            }
            let mut squares = [Pos::new(0, 0); PLACEMENT_SIZE];
            for (slot, part) in squares.iter_mut().zip(parts) {
                *slot = parse_pos(part)?;
            }
            return Ok(Move::Placement(squares));
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(Error::malformed(s, "expected <from>-<to>"));
        }
        Ok(Move::Step {
            from: parse_pos(parts[0])?,
            to: parse_pos(parts[1])?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => f.write_str("E"),
            Move::Step { from, to } => write!(f, "{from}-{to}"),
            Move::Placement(squares) => {
                for (i, pos) in squares.iter().enumerate() {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    write!(f, "{pos}")?;
                }
                Ok(())
            }
        }
    }
}
