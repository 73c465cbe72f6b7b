#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod coordinate;
#[cfg(feature = "std")]
mod engine;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
mod session;
mod ship;
mod snapshot;
#[cfg(feature = "std")]
mod terminal;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::random_target;
pub use bitboard::{BitBoard, Grid};
pub use board::{Board, BoardRecord};
pub use common::*;
pub use config::*;
pub use coordinate::Coordinate;
#[cfg(feature = "std")]
pub use engine::{FireResponse, GameEngine};
pub use game::{FireOutcome, GameState, Phase, ShotRecord};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{parse_body, Action, ActionResponse, ErrorResponse, Request};
#[cfg(feature = "std")]
pub use session::{InMemorySessionStore, SessionId, SessionSlot, SessionStore};
pub use ship::{Orientation, Placement, Ship};
pub use snapshot::{Marks, SideSummary, StateSnapshot, Summary};
#[cfg(feature = "std")]
pub use terminal::run_terminal;
