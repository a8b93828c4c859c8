//! In-memory SessionStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::{GameState, SessionId};

use super::{RepositoryError, Result, SessionStore};

/// In-memory implementation of [`SessionStore`].
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, GameState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, state: &GameState) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.insert(state.id, state.clone());
        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<GameState>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(&id).cloned())
    }

    fn exists(&self, id: SessionId) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: SessionId) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(&id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SessionId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<SessionId> = sessions.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
