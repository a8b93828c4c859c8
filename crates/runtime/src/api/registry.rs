//! Registry of live sessions.
//!
//! The [`SessionRegistry`] maps session ids to the handles of their workers.
//! It is owned by one [`crate::Runtime`]; two runtimes never share sessions.
//! Finished sessions are removed once their end has been published, while
//! their final state stays in the session store.

use std::collections::HashMap;
use std::sync::Arc;

use battle_core::SessionId;
use tokio::sync::RwLock;

use super::SessionHandle;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle, replacing any previous one for the same session.
    pub async fn insert(&self, handle: SessionHandle) {
        self.sessions.write().await.insert(handle.id(), handle);
    }

    pub async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Ids of all live sessions, sorted.
    pub async fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.read().await.keys().copied().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every handle held by the registry.
    pub(crate) async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}
