//! Ship geometry: a straight run of cells anchored at an origin.

use core::fmt;

use crate::bitboard::Grid;
use crate::common::BoardError;
use crate::config::BOARD_SIZE;
use crate::coordinate::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Cells share a row; columns increase from the origin.
    Horizontal,
    /// Cells share a column; rows increase from the origin.
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    fn step(self, origin: Coordinate, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (origin.row(), origin.col() + i),
            Orientation::Vertical => (origin.row() + i, origin.col()),
        }
    }
}

/// Where a ship sits, without derived occupancy data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub length: usize,
    pub orientation: Orientation,
    pub origin: Coordinate,
}

/// A ship placed fully inside the board.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Placement", into = "Placement")
)]
pub struct Ship {
    length: usize,
    orientation: Orientation,
    origin: Coordinate,
    mask: Grid,
}

impl Ship {
    /// Place a ship of `length` at `origin` running in `orientation`.
    pub fn new(
        length: usize,
        orientation: Orientation,
        origin: Coordinate,
    ) -> Result<Self, BoardError> {
        if length == 0 || length > BOARD_SIZE as usize {
            return Err(BoardError::InvalidLength(length));
        }
        let mut mask = Grid::new();
        for i in 0..length {
            let (r, c) = orientation.step(origin, i);
            let cell = Coordinate::new(r, c).map_err(|_| BoardError::ShipOutOfBounds)?;
            mask.insert(cell);
        }
        Ok(Ship {
            length,
            orientation,
            origin,
            mask,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> Grid {
        self.mask
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.mask.contains(coord)
    }

    /// Cells from the origin outward.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.length).filter_map(move |i| {
            let (r, c) = self.orientation.step(self.origin, i);
            Coordinate::new(r, c).ok()
        })
    }

    pub fn placement(&self) -> Placement {
        Placement {
            length: self.length,
            orientation: self.orientation,
            origin: self.origin,
        }
    }
}

impl TryFrom<Placement> for Ship {
    type Error = BoardError;

    fn try_from(p: Placement) -> Result<Self, Self::Error> {
        Ship::new(p.length, p.orientation, p.origin)
    }
}

impl From<Ship> for Placement {
    fn from(ship: Ship) -> Self {
        ship.placement()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: {}, orientation: {:?} }}",
            self.length, self.origin, self.orientation
        )
    }
}
