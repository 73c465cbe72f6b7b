//! Board coordinates and their textual `A1`..`J10` form.
//!
//! Rows map to letters (`A` is row 0) and columns map to numbers (`1` is
//! column 0). The textual form is only used at the edges; everything inside
//! the engine keys on [`Coordinate`] directly.

use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use crate::common::{BoardError, GameError};
use crate::config::BOARD_SIZE;

pub(crate) const ROW_LETTERS: &[u8; BOARD_SIZE as usize] = b"ABCDEFGHIJ";

/// A cell on the 10x10 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Build a coordinate, rejecting cells outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(BoardError::IndexOutOfBounds { row, col });
        }
        Ok(Coordinate {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..BOARD_CELLS`.
    pub fn index(&self) -> usize {
        self.row() * BOARD_SIZE as usize + self.col()
    }

    /// Inverse of [`Coordinate::index`].
    pub fn from_index(index: usize) -> Result<Self, BoardError> {
        let n = BOARD_SIZE as usize;
        Self::new(index / n, index % n)
    }

    /// Every cell on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Parse the textual form. Surrounding whitespace is ignored and the row
    /// letter is case-insensitive; anything else outside `A1`..`J10` is an
    /// [`GameError::InvalidCoordinate`].
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let trimmed = text.trim();
        let invalid = || GameError::InvalidCoordinate(String::from(trimmed));

        let (&letter, digits) = trimmed.as_bytes().split_first().ok_or_else(invalid)?;
        let row = ROW_LETTERS
            .iter()
            .position(|&l| l == letter.to_ascii_uppercase())
            .ok_or_else(invalid)?;
        let col = match digits {
            [d @ b'1'..=b'9'] => (d - b'1') as usize,
            [b'1', b'0'] => 9,
            _ => return Err(invalid()),
        };
        Self::new(row, col).map_err(|_| invalid())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW_LETTERS[self.row()] as char, self.col() + 1)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse(s)
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Coordinate::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corners() {
        assert_eq!(Coordinate::parse("A1").unwrap(), Coordinate::new(0, 0).unwrap());
        assert_eq!(Coordinate::parse("J10").unwrap(), Coordinate::new(9, 9).unwrap());
        assert_eq!(Coordinate::parse("C7").unwrap(), Coordinate::new(2, 6).unwrap());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(Coordinate::parse("  b7 ").unwrap(), Coordinate::new(1, 6).unwrap());
        assert_eq!(Coordinate::parse("j10").unwrap().to_string(), "J10");
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "A", "K1", "A11", "A0", "A01", "1A", "AA1", "A1 0", "Ä1", "A-1"] {
            assert!(
                matches!(Coordinate::parse(text), Err(GameError::InvalidCoordinate(_))),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn display_matches_parse() {
        for coord in Coordinate::all() {
            assert_eq!(Coordinate::parse(&coord.to_string()).unwrap(), coord);
        }
    }

    #[test]
    fn index_round_trips() {
        for (i, coord) in Coordinate::all().enumerate() {
            assert_eq!(coord.index(), i);
            assert_eq!(Coordinate::from_index(i).unwrap(), coord);
        }
        assert!(Coordinate::from_index(100).is_err());
    }
}
