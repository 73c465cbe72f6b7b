#![cfg(feature = "std")]

//! Session-facing game operations.
//!
//! [`GameEngine`] resolves a session identity to its [`GameState`] through
//! an injected [`SessionStore`], holds the session's lock for the whole
//! operation, and returns a [`StateSnapshot`] of the result.

use std::sync::{Mutex, MutexGuard};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::GameError;
use crate::coordinate::Coordinate;
use crate::game::{FireOutcome, GameState};
use crate::session::{InMemorySessionStore, SessionId, SessionStore};
use crate::snapshot::StateSnapshot;

/// Result of a fire operation: the shots resolved plus the state after them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireResponse {
    #[serde(flatten)]
    pub shots: FireOutcome,
    #[serde(flatten)]
    pub state: StateSnapshot,
}

pub struct GameEngine<S: SessionStore = InMemorySessionStore> {
    store: S,
    rng: Mutex<SmallRng>,
}

impl GameEngine<InMemorySessionStore> {
    /// Engine over a fresh in-memory store, seeded from the thread RNG.
    pub fn in_memory() -> Self {
        Self::new(InMemorySessionStore::new())
    }
}

impl<S: SessionStore> GameEngine<S> {
    pub fn new(store: S) -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(store, SmallRng::from_rng(&mut seed_rng))
    }

    /// Engine whose placements and computer shots are reproducible.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(store: S, rng: SmallRng) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Discard the session's game and start a new one with fresh fleets.
    pub fn new_game(&self, session: &SessionId) -> Result<StateSnapshot, GameError> {
        let slot = self.store.slot(session);
        let mut guard = lock(&slot);
        let game = GameState::new(&mut *self.rng())?;
        log::info!("session {}: new game", session);
        let snapshot = game.snapshot();
        *guard = Some(game);
        Ok(snapshot)
    }

    /// Clear shots, counters and outcome while keeping both fleets.
    pub fn restart_game(&self, session: &SessionId) -> Result<StateSnapshot, GameError> {
        self.with_game(session, |game| {
            game.restart();
            log::info!("session {}: game restarted", session);
            game.snapshot()
        })
    }

    pub fn get_state(&self, session: &SessionId) -> Result<StateSnapshot, GameError> {
        self.with_game(session, |game| game.snapshot())
    }

    /// Fire at the textual coordinate `coord`. A malformed coordinate is
    /// rejected before the game is touched.
    pub fn fire(&self, session: &SessionId, coord: &str) -> Result<FireResponse, GameError> {
        let target = Coordinate::parse(coord).map_err(|e| {
            log::warn!("session {}: rejected coordinate {:?}", session, coord);
            e
        })?;
        self.with_game(session, |game| self.fire_at(game, target))
    }

    /// Destroy the session's record.
    pub fn end_session(&self, session: &SessionId) -> bool {
        self.store.end_session(session)
    }

    /// Run `f` with exclusive access to the session's game, creating the game
    /// first if the session has none or its record is not consistent.
    ///
    /// Only the session's own lock is held while `f` runs. The shared RNG is
    /// locked just for fleet placement and for resolving shots.
    pub fn with_game<T>(
        &self,
        session: &SessionId,
        f: impl FnOnce(&mut GameState) -> T,
    ) -> Result<T, GameError> {
        let slot = self.store.slot(session);
        let mut guard = lock(&slot);

        let game = match guard.take() {
            Some(game) if game.is_consistent() => game,
            stale => {
                if stale.is_some() {
                    log::warn!("session {}: discarding inconsistent game record", session);
                } else {
                    log::info!("session {}: starting first game", session);
                }
                GameState::new(&mut *self.rng())?
            }
        };
        let game = guard.insert(game);
        Ok(f(game))
    }

    /// Resolve a shot and package it with the resulting snapshot.
    pub(crate) fn fire_at(&self, game: &mut GameState, target: Coordinate) -> FireResponse {
        let shots = game.fire(&mut *self.rng(), target);
        FireResponse {
            shots,
            state: game.snapshot(),
        }
    }

    fn rng(&self) -> MutexGuard<'_, SmallRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// A poisoned session lock may hold a half-applied update; `with_game`
// replaces any record that fails the consistency check.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}
