//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, setup and action
//! providers so clients can bubble them up with consistent context.
use std::time::Duration;

use battle_core::{MulliganError, PlayerId, SessionId, SetupError};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} has already ended")]
    SessionEnded(SessionId),

    #[error("session store did not answer within {0:?}")]
    PersistenceTimeout(Duration),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Mulligan(#[from] MulliganError),

    #[error("runtime requires a card catalog before building")]
    MissingCatalog,

    #[error("invalid card catalog: {0}")]
    Catalog(String),

    #[error("no action available for player {0:?}")]
    NoActionAvailable(PlayerId),
}
