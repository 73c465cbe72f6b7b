//! One side's board: its fleet plus the shots the opponent has fired at it.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use rand::Rng;

use crate::bitboard::Grid;
use crate::common::{BoardError, ShotOutcome};
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS};
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, Ship};

/// Serializable board record. Occupancy is rebuilt on load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardRecord {
    pub ships: Vec<Ship>,
    pub shots: BTreeMap<Coordinate, ShotOutcome>,
}

/// Fleet placement and incoming shot history for one side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BoardRecord", into = "BoardRecord")
)]
pub struct Board {
    ships: Vec<Ship>,
    ship_map: Grid,
    shots: BTreeMap<Coordinate, ShotOutcome>,
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new() -> Self {
        Board {
            ships: Vec::new(),
            ship_map: Grid::new(),
            shots: BTreeMap::new(),
        }
    }

    /// Create a board with the standard fleet placed at random.
    pub fn with_random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, BoardError> {
        Self::with_random_ships(rng, &FLEET)
    }

    /// Place ships of the given lengths in order. Each ship is placed
    /// independently; earlier ships are never moved to make room.
    pub fn with_random_ships<R: Rng + ?Sized>(
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<Self, BoardError> {
        let mut board = Board::new();
        for &len in lengths {
            let (origin, orientation) = board.random_placement(rng, len)?;
            board.place(len, orientation, origin)?;
        }
        Ok(board)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> Grid {
        self.ship_map
    }

    /// Shots the opponent has fired at this board.
    pub fn shots(&self) -> &BTreeMap<Coordinate, ShotOutcome> {
        &self.shots
    }

    /// Place a single ship.
    pub fn place(
        &mut self,
        length: usize,
        orientation: Orientation,
        origin: Coordinate,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(length, orientation, origin)?;
        self.add_ship(ship)
    }

    fn add_ship(&mut self, ship: Ship) -> Result<(), BoardError> {
        if self.ship_map.intersects(&ship.mask()) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map = self.ship_map | ship.mask();
        self.ships.push(ship);
        Ok(())
    }

    /// Find a free slot for a ship of `length`.
    ///
    /// Samples a random orientation and anchor anywhere on the board and
    /// rejects candidates that leave the board or collide with placed ships.
    /// After `MAX_PLACEMENT_ATTEMPTS` rejections it scans deterministically
    /// for the first free slot, horizontal first.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        if length == 0 || length > BOARD_SIZE as usize {
            return Err(BoardError::InvalidLength(length));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let origin = Coordinate::new(
                rng.random_range(0..BOARD_SIZE as usize),
                rng.random_range(0..BOARD_SIZE as usize),
            )?;
            if self.fits(length, orientation, origin) {
                return Ok((origin, orientation));
            }
        }

        log::warn!(
            "random placement for length {} exhausted {} attempts; scanning",
            length,
            MAX_PLACEMENT_ATTEMPTS
        );
        Orientation::ALL
            .iter()
            .flat_map(|&o| Coordinate::all().map(move |c| (c, o)))
            .find(|&(c, o)| self.fits(length, o, c))
            .ok_or(BoardError::UnableToPlaceShip(length))
    }

    fn fits(&self, length: usize, orientation: Orientation, origin: Coordinate) -> bool {
        match Ship::new(length, orientation, origin) {
            Ok(ship) => !self.ship_map.intersects(&ship.mask()),
            Err(_) => false,
        }
    }

    pub fn is_ship_cell(&self, coord: Coordinate) -> bool {
        self.ship_map.contains(coord)
    }

    /// Stored outcome of an earlier shot at `coord`, if any.
    pub fn shot_at(&self, coord: Coordinate) -> Option<ShotOutcome> {
        self.shots.get(&coord).copied()
    }

    /// Resolve a shot at `coord`. A coordinate already shot keeps its stored
    /// outcome; it is never re-resolved.
    pub fn receive_shot(&mut self, coord: Coordinate) -> ShotOutcome {
        if let Some(outcome) = self.shot_at(coord) {
            return outcome;
        }
        let outcome = if self.is_ship_cell(coord) {
            ShotOutcome::Hit
        } else {
            ShotOutcome::Miss
        };
        self.shots.insert(coord, outcome);
        outcome
    }

    /// Forget every shot while keeping the fleet in place.
    pub fn clear_shots(&mut self) {
        self.shots.clear();
    }

    /// Total ship segments on the board.
    pub fn total_ship_cells(&self) -> usize {
        self.ship_map.count_ones()
    }

    /// Number of recorded hits.
    pub fn hits_taken(&self) -> usize {
        self.shots.values().filter(|o| o.is_hit()).count()
    }

    /// Whether the fleet matches the configured lengths in order and every
    /// recorded hit actually lands on a ship.
    pub fn has_standard_fleet(&self) -> bool {
        let lengths_match = self.ships.len() == FLEET.len()
            && self.ships.iter().zip(FLEET.iter()).all(|(s, &l)| s.length() == l);
        let shots_match = self
            .shots
            .iter()
            .all(|(&c, &o)| o.is_hit() == self.is_ship_cell(c));
        lengths_match && shots_match
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let mut board = Board::new();
        for ship in record.ships {
            board.add_ship(ship)?;
        }
        board.shots = record.shots;
        Ok(board)
    }
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        BoardRecord {
            ships: board.ships,
            shots: board.shots,
        }
    }
}
