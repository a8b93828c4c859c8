//! Repository contract for saving and loading sessions.

use battle_core::{GameState, SessionId};

use super::Result;

/// Durable storage for whole sessions, keyed by [`SessionId`].
///
/// Implementations are synchronous; the session worker calls them from a
/// blocking task under a timeout. A saved session is the complete
/// [`GameState`], action log included, so loading it is enough to resume.
pub trait SessionStore: Send + Sync {
    /// Insert or overwrite a session.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Load a session, or `None` if it was never saved.
    fn load(&self, id: SessionId) -> Result<Option<GameState>>;

    /// Check if a session exists
    fn exists(&self, id: SessionId) -> bool;

    /// Delete a session. Deleting a missing session is not an error.
    fn delete(&self, id: SessionId) -> Result<()>;

    /// List all stored session ids, ascending.
    fn list(&self) -> Result<Vec<SessionId>> {
        Ok(vec![])
    }
}
