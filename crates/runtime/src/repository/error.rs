//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by session store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
