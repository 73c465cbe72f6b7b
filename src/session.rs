#![cfg(feature = "std")]

//! Session-scoped storage of game records.
//!
//! Each session identity owns at most one [`GameState`]. The store hands out
//! a per-session lock so that every operation against a session runs to
//! completion before the next one starts, while different sessions proceed
//! independently.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::game::GameState;

/// Opaque identity of a client session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::new(id)
    }
}

/// Slot holding a session's game, absent until first use.
pub type SessionSlot = Arc<Mutex<Option<GameState>>>;

/// Storage of one game record per session.
pub trait SessionStore: Send + Sync {
    /// The slot for `session`, created empty if the session is new. Holding
    /// the slot's lock grants exclusive access to the session's game.
    fn slot(&self, session: &SessionId) -> SessionSlot;

    /// Destroy the session's record. Returns `true` if one existed.
    fn end_session(&self, session: &SessionId) -> bool;

    /// Number of sessions currently known.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local [`SessionStore`].
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionSlot>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SessionSlot>> {
        // Map updates are single calls; a poisoned lock still holds a valid map.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn slot(&self, session: &SessionId) -> SessionSlot {
        self.sessions()
            .entry(session.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }

    fn end_session(&self, session: &SessionId) -> bool {
        self.sessions().remove(session).is_some()
    }

    fn len(&self) -> usize {
        self.sessions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_is_shared_per_session() {
        let store = InMemorySessionStore::new();
        let a = SessionId::from("a");
        let first = store.slot(&a);
        let second = store.slot(&a);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &store.slot(&SessionId::from("b"))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn end_session_forgets_record() {
        let store = InMemorySessionStore::new();
        let a = SessionId::from("a");
        let _ = store.slot(&a);
        assert!(store.end_session(&a));
        assert!(!store.end_session(&a));
        assert!(store.is_empty());
    }
}
