//! Player actions.
//!
//! Every action a player can submit is a typed [`ActionParams`] variant. Each
//! variant wraps a transition struct (`PlayCardAction`, `AttackAction`, ...)
//! implementing [`ActionTransition`], which the engine drives through
//! `pre_validate → apply → post_validate` on a staged copy of the state.
//!
//! # Module Structure
//!
//! - `effect`: card effects, conditions and triggers
//! - `error`: [`ActionError`]
//! - `kinds`: one transition per action kind
//! - `transition`: the [`ActionTransition`] trait

pub mod effect;
mod error;
mod kinds;
mod transition;

pub use effect::{
    Condition, Effect, EffectError, EffectKind, EffectTarget, PlayerRef, TriggerEvent,
    TriggeredEffect,
};
pub use error::ActionError;
pub use kinds::{
    AttackAction, DrawCardAction, EndPhaseAction, EndTurnAction, ExtraDrawAction,
    MoveCharacterAction, PlayCardAction, SurrenderAction,
};
pub use transition::ActionTransition;

use crate::state::{CardInstanceId, Phase, PlayerId};

/// Kinds of player actions, named as they appear on the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActionKind {
    DrawCard,
    ExtraDraw,
    PlayCard,
    Attack,
    MoveCharacter,
    EndPhase,
    EndTurn,
    Surrender,
}

impl ActionKind {
    /// Phase the action is restricted to, or `None` when always legal.
    pub fn required_phase(self) -> Option<Phase> {
        match self {
            Self::DrawCard | Self::ExtraDraw => Some(Phase::Start),
            Self::MoveCharacter => Some(Phase::Move),
            Self::PlayCard => Some(Phase::Main),
            Self::Attack => Some(Phase::Attack),
            Self::EndPhase | Self::EndTurn | Self::Surrender => None,
        }
    }
}

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AttackTarget {
    /// The defending player's life area.
    Player,
    /// A character on the defending player's front line.
    Character(CardInstanceId),
}

/// Typed payload of an action, one variant per [`ActionKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionParams {
    DrawCard(DrawCardAction),
    ExtraDraw(ExtraDrawAction),
    PlayCard(PlayCardAction),
    Attack(AttackAction),
    MoveCharacter(MoveCharacterAction),
    EndPhase(EndPhaseAction),
    EndTurn(EndTurnAction),
    Surrender(SurrenderAction),
}

impl ActionParams {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::DrawCard(_) => ActionKind::DrawCard,
            Self::ExtraDraw(_) => ActionKind::ExtraDraw,
            Self::PlayCard(_) => ActionKind::PlayCard,
            Self::Attack(_) => ActionKind::Attack,
            Self::MoveCharacter(_) => ActionKind::MoveCharacter,
            Self::EndPhase(_) => ActionKind::EndPhase,
            Self::EndTurn(_) => ActionKind::EndTurn,
            Self::Surrender(_) => ActionKind::Surrender,
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ActionParams {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_action!(
    DrawCard(DrawCardAction),
    ExtraDraw(ExtraDrawAction),
    PlayCard(PlayCardAction),
    Attack(AttackAction),
    MoveCharacter(MoveCharacterAction),
    EndPhase(EndPhaseAction),
    EndTurn(EndTurnAction),
    Surrender(SurrenderAction),
);

/// A submitted action: who acts and what they do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: PlayerId,
    pub params: ActionParams,
}

impl Action {
    pub fn new(actor: PlayerId, params: impl Into<ActionParams>) -> Self {
        Self {
            actor,
            params: params.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ActionKind {
        self.params.kind()
    }
}
