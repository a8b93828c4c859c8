//! Errors raised while evaluating conditions and resolving effects.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardInstanceId, PlayerId, Zone};

use super::EffectTarget;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// Condition variant is accepted in card data but has no rules yet.
    #[error("condition `{0}` is not yet supported")]
    NotSupported(&'static str),

    #[error("condition refers to unknown player {0}")]
    UnknownPlayer(PlayerId),
}

impl GameError for ConditionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Soft
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotSupported(_) => "CONDITION_NOT_SUPPORTED",
            Self::UnknownPlayer(_) => "CONDITION_UNKNOWN_PLAYER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// Effect variant exists but has no resolution rules yet.
    #[error("effect `{0}` is not yet supported")]
    NotSupported(&'static str),

    /// Target specifier does not fit the effect (e.g. drawing for a character).
    #[error("effect `{effect}` cannot target {target:?}")]
    InvalidTarget {
        effect: &'static str,
        target: EffectTarget,
    },

    #[error("target {0:?} not found")]
    TargetNotFound(EffectTarget),

    #[error("source card {0} left play")]
    SourceLeftPlay(CardInstanceId),

    #[error("effect refers to unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} is full")]
    ZoneFull(Zone),
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTarget { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Soft,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Condition(inner) => inner.error_code(),
            Self::NotSupported(_) => "EFFECT_NOT_SUPPORTED",
            Self::InvalidTarget { .. } => "EFFECT_INVALID_TARGET",
            Self::TargetNotFound(_) => "EFFECT_TARGET_NOT_FOUND",
            Self::SourceLeftPlay(_) => "EFFECT_SOURCE_LEFT_PLAY",
            Self::UnknownPlayer(_) => "EFFECT_UNKNOWN_PLAYER",
            Self::ZoneFull(_) => "EFFECT_ZONE_FULL",
        }
    }
}
