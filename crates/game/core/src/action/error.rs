//! Action execution errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BoardError, CardInstanceId, CardType, Color, Phase, PlayerId, Zone};

use super::ActionKind;
use super::effect::EffectError;

/// Errors that can occur while validating or executing a player action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    // ========================================================================
    // Session gate
    // ========================================================================
    #[error("the game is already over")]
    GameOver,

    #[error("setup is not complete")]
    SetupIncomplete,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{actor} is not the active player ({active} is)")]
    NotActivePlayer { actor: PlayerId, active: PlayerId },

    #[error("{kind} is only legal in {required} (current phase: {current})")]
    WrongPhase {
        kind: ActionKind,
        required: Phase,
        current: Phase,
    },

    // ========================================================================
    // Payload
    // ========================================================================
    #[error("unknown action type `{0}`")]
    UnknownActionType(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    // ========================================================================
    // Resources
    // ========================================================================
    #[error("deck is empty")]
    DeckEmpty,

    #[error("extra draw already used this turn")]
    ExtraDrawUsed,

    #[error("not enough AP: need {required}, have {available}")]
    InsufficientAp { required: u32, available: u32 },

    #[error("not enough {color} energy: need {required}, have {available}")]
    InsufficientEnergy {
        color: Color,
        required: u32,
        available: u32,
    },

    // ========================================================================
    // Cards and board
    // ========================================================================
    #[error("{0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error("{0} cannot be played")]
    UnplayableCard(CardInstanceId),

    #[error("a {card_type} card cannot be placed on {zone}")]
    InvalidZone { card_type: CardType, zone: Zone },

    #[error("{0} is full")]
    ZoneFull(Zone),

    #[error("slot {slot} on {zone} is occupied")]
    SlotOccupied { zone: Zone, slot: u8 },

    #[error("slot {0} does not exist")]
    InvalidSlot(u8),

    #[error("{0} is not one of your characters in play")]
    CharacterNotFound(CardInstanceId),

    #[error("{0} is already on {1}")]
    AlreadyInZone(CardInstanceId, Zone),

    // ========================================================================
    // Combat
    // ========================================================================
    #[error("{0} cannot attack")]
    AttackerNotReady(CardInstanceId),

    #[error("{0} is not on the opponent's front line")]
    DefenderNotFound(CardInstanceId),

    // ========================================================================
    // Effects
    // ========================================================================
    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl From<BoardError> for ActionError {
    fn from(error: BoardError) -> Self {
        match error {
            BoardError::ZoneFull(zone) => Self::ZoneFull(zone),
            BoardError::SlotOccupied { zone, slot } => Self::SlotOccupied { zone, slot },
            BoardError::InvalidSlot { slot } => Self::InvalidSlot(slot),
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            UnknownPlayer(_) | CardNotInHand(_) | CharacterNotFound(_) | DefenderNotFound(_) => {
                ErrorSeverity::Resource
            }
            Effect(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            GameOver => "ACTION_GAME_OVER",
            SetupIncomplete => "ACTION_SETUP_INCOMPLETE",
            UnknownPlayer(_) => "ACTION_UNKNOWN_PLAYER",
            NotActivePlayer { .. } => "ACTION_NOT_ACTIVE_PLAYER",
            WrongPhase { .. } => "ACTION_WRONG_PHASE",
            UnknownActionType(_) => "ACTION_UNKNOWN_TYPE",
            MalformedPayload(_) => "ACTION_MALFORMED_PAYLOAD",
            DeckEmpty => "ACTION_DECK_EMPTY",
            ExtraDrawUsed => "ACTION_EXTRA_DRAW_USED",
            InsufficientAp { .. } => "ACTION_INSUFFICIENT_AP",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            CardNotInHand(_) => "ACTION_CARD_NOT_IN_HAND",
            UnplayableCard(_) => "ACTION_UNPLAYABLE_CARD",
            InvalidZone { .. } => "ACTION_INVALID_ZONE",
            ZoneFull(_) => "ACTION_ZONE_FULL",
            SlotOccupied { .. } => "ACTION_SLOT_OCCUPIED",
            InvalidSlot(_) => "ACTION_INVALID_SLOT",
            CharacterNotFound(_) => "ACTION_CHARACTER_NOT_FOUND",
            AlreadyInZone(..) => "ACTION_ALREADY_IN_ZONE",
            AttackerNotReady(_) => "ACTION_ATTACKER_NOT_READY",
            DefenderNotFound(_) => "ACTION_DEFENDER_NOT_FOUND",
            Effect(inner) => inner.error_code(),
        }
    }
}
