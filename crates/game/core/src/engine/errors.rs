//! Error types for the action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, AttackAction, DrawCardAction, EndPhaseAction, EndTurnAction,
    ExtraDrawAction, MoveCharacterAction, PlayCardAction, SurrenderAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    /// Rejected before any transition ran: session gate, actor, phase or payload.
    #[error("{0}")]
    Rejected(ActionError),

    #[error("draw card failed: {0}")]
    DrawCard(TransitionPhaseError<<DrawCardAction as ActionTransition>::Error>),

    #[error("extra draw failed: {0}")]
    ExtraDraw(TransitionPhaseError<<ExtraDrawAction as ActionTransition>::Error>),

    #[error("play card failed: {0}")]
    PlayCard(TransitionPhaseError<<PlayCardAction as ActionTransition>::Error>),

    #[error("attack failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("move character failed: {0}")]
    MoveCharacter(TransitionPhaseError<<MoveCharacterAction as ActionTransition>::Error>),

    #[error("end phase failed: {0}")]
    EndPhase(TransitionPhaseError<<EndPhaseAction as ActionTransition>::Error>),

    #[error("end turn failed: {0}")]
    EndTurn(TransitionPhaseError<<EndTurnAction as ActionTransition>::Error>),

    #[error("surrender failed: {0}")]
    Surrender(TransitionPhaseError<<SurrenderAction as ActionTransition>::Error>),
}

impl ExecuteError {
    /// The underlying rule violation, whichever stage raised it.
    pub fn action_error(&self) -> &ActionError {
        match self {
            Self::Rejected(error) => error,
            Self::DrawCard(inner)
            | Self::ExtraDraw(inner)
            | Self::PlayCard(inner)
            | Self::Attack(inner)
            | Self::MoveCharacter(inner)
            | Self::EndPhase(inner)
            | Self::EndTurn(inner)
            | Self::Surrender(inner) => &inner.error,
        }
    }

    /// Stage that failed, or `None` for gate rejections.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Rejected(_) => None,
            Self::DrawCard(inner)
            | Self::ExtraDraw(inner)
            | Self::PlayCard(inner)
            | Self::Attack(inner)
            | Self::MoveCharacter(inner)
            | Self::EndPhase(inner)
            | Self::EndTurn(inner)
            | Self::Surrender(inner) => Some(inner.phase),
        }
    }
}

impl From<ActionError> for ExecuteError {
    fn from(error: ActionError) -> Self {
        Self::Rejected(error)
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.phase() {
            // A post-condition failing after a clean apply is a rules bug.
            Some(TransitionPhase::PostValidate) => ErrorSeverity::Internal,
            _ => self.action_error().severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
