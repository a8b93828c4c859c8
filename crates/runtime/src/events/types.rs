//! Event types for different topics.

use battle_core::{GameEvent, Phase, PlayerId, SessionId, WinReason};
use serde::{Deserialize, Serialize};

/// Engine event tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionGameEvent {
    pub session: SessionId,
    pub event: GameEvent,
}

/// Outcome of a submission, accepted or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
    Accepted {
        session: SessionId,
        player: PlayerId,
        action_type: String,
        /// Action log id of the submission.
        log_id: u64,
        next_phase: Option<Phase>,
    },
    Rejected {
        session: SessionId,
        player: PlayerId,
        action_type: String,
        log_id: u64,
        error_code: String,
        error: String,
    },
}

/// Session lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Created {
        session: SessionId,
        players: [PlayerId; 2],
    },
    /// Both mulligans are in and the first turn has started.
    Started { session: SessionId },
    Resumed { session: SessionId },
    Ended {
        session: SessionId,
        winner: PlayerId,
        loser: PlayerId,
        reason: WinReason,
    },
    PersistenceFailed { session: SessionId, error: String },
}

impl SessionEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Created { session, .. }
            | Self::Started { session }
            | Self::Resumed { session }
            | Self::Ended { session, .. }
            | Self::PersistenceFailed { session, .. } => *session,
        }
    }
}

impl ActionEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Accepted { session, .. } | Self::Rejected { session, .. } => *session,
        }
    }
}
