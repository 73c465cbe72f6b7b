//! Common types for the game: shot outcomes, sides and error kinds.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

/// Outcome of a single shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShotOutcome {
    /// Shot landed on a ship segment.
    Hit,
    /// Shot landed on open water.
    Miss,
}

impl ShotOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShotOutcome::Hit => "hit",
            ShotOutcome::Miss => "miss",
        }
    }
}

impl core::fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Computer => f.write_str("computer"),
        }
    }
}

/// Errors returned by board and fleet operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Row or column outside the board.
    IndexOutOfBounds { row: usize, col: usize },
    /// Ship would extend past the board edge.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship length is zero or longer than the board.
    InvalidLength(usize),
    /// No free slot exists for a ship of the given length.
    UnableToPlaceShip(usize),
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::IndexOutOfBounds { row, col } => {
                write!(f, "Index out of bounds: row={}, col={}", row, col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::InvalidLength(len) => write!(f, "Invalid ship length {}", len),
            BoardError::UnableToPlaceShip(len) => {
                write!(f, "Unable to place ship of length {}", len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors surfaced to callers of the game operations.
///
/// None of these are fatal and none of them leave a game partially mutated:
/// validation always happens before any counter or shot record changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Textual coordinate is not a letter A-J followed by 1-10.
    InvalidCoordinate(String),
    /// Requested action is not supported.
    UnknownAction(String),
    /// Request payload is missing a required field.
    MalformedRequestBody(String),
    /// Fleet generation failed.
    Board(BoardError),
}

impl GameError {
    /// HTTP-like status code for the error.
    pub fn status_code(&self) -> u16 {
        match self {
            GameError::InvalidCoordinate(_) | GameError::MalformedRequestBody(_) => 400,
            GameError::UnknownAction(_) => 404,
            GameError::Board(_) => 500,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidCoordinate(text) => {
                write!(f, "Invalid coord '{}'. Use A1-J10.", text)
            }
            GameError::UnknownAction(action) => write!(f, "Unknown action '{}'.", action),
            GameError::MalformedRequestBody(reason) => {
                write!(f, "Malformed request body: {}", reason)
            }
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
