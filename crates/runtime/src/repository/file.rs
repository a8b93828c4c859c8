//! File-based SessionStore implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use battle_core::{GameState, SessionId};

use super::{RepositoryError, Result, SessionStore};

/// File-based implementation of [`SessionStore`].
///
/// Stores each session as `session_{id}.bin` in bincode format. Every save
/// writes its own uniquely named temp file in the same directory and renames
/// it into place, so a crash mid-save leaves the previous snapshot intact and
/// overlapping saves never share a partial file.
pub struct FileSessionStore {
    base_dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory for sessions, e.g. `~/.local/share/battle/sessions`.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "battle")
            .map(|dirs| dirs.data_dir().join("sessions"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, id: SessionId) -> PathBuf {
        self.base_dir.join(format!("session_{id}.bin"))
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, state: &GameState) -> Result<()> {
        let path = self.session_path(state.id);

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let mut temp = tempfile::Builder::new()
            .prefix(&format!("session_{}.", state.id))
            .suffix(".tmp")
            .tempfile_in(&self.base_dir)?;
        temp.write_all(&bytes)?;
        temp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(
            target: "runtime::store",
            session = %state.id,
            path = %path.display(),
            "saved session"
        );
        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<GameState>> {
        let path = self.session_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if state.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds session {}",
                path.display(),
                state.id
            )));
        }
        Ok(Some(state))
    }

    fn exists(&self, id: SessionId) -> bool {
        self.session_path(id).exists()
    }

    fn delete(&self, id: SessionId) -> Result<()> {
        let path = self.session_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<SessionId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(hex) = filename
                    .strip_prefix("session_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(raw) = u64::from_str_radix(hex, 16)
            {
                ids.push(SessionId(raw));
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
