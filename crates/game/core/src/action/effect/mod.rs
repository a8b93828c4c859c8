//! Card effect system.
//!
//! Effects are closed, tagged variants ([`EffectKind`]) dispatched through a
//! single exhaustive match in [`apply_effect`]. Adding an effect type is a
//! compile-checked change; variants without rules return
//! [`EffectError::NotSupported`] instead of silently doing nothing.
//!
//! # Architecture
//!
//! - Individual effects are structs (`DamageEffect`, `DrawEffect`, ...) in their
//!   own files, each exposing `apply(&self, ctx, target)`
//! - [`EffectKind`] wraps them for card data and dispatch
//! - [`Condition`] gates an effect; an unmet condition is a silent no-op
//! - [`trigger`] scans permanents for matching triggers and resolves life-area
//!   reveal triggers

mod condition;
mod damage;
mod displacement;
mod error;
mod kinds;
mod resource;
mod status;
pub mod trigger;

pub use condition::Condition;
pub use damage::DamageEffect;
pub use displacement::{DestroyEffect, MoveEffect, ReturnToHandEffect};
pub use error::{ConditionError, EffectError};
pub use kinds::EffectKind;
pub use resource::{DrawEffect, EnergyEffect};
pub use status::{BoostEffect, DebuffEffect};
pub use trigger::{
    TriggerData, TriggerEvent, TriggerScope, TriggeredEffect, process_triggers, resolve_life_trigger,
};

pub(crate) use displacement::retire_character;

use crate::event::GameEvent;
use crate::state::{CardInstanceId, GameState, PlayerId};

/// Player reference relative to the effect's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PlayerRef {
    Controller,
    Opponent,
}

/// Who or what an effect acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectTarget {
    Player(PlayerRef),
    /// The card that owns the effect.
    Source,
    Card(CardInstanceId),
    /// Lowest-slot character on that player's front line.
    FirstFrontLine(PlayerRef),
    /// Every character on that player's front line.
    AllCharacters(PlayerRef),
}

/// A complete effect: what, on whom, and when.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub target: EffectTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Effect {
    pub fn new(kind: EffectKind, target: EffectTarget) -> Self {
        Self {
            kind,
            target,
            condition: None,
            description: String::new(),
        }
    }

    /// Builder: gate the effect behind a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Builder: human-readable rules text.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn label(&self) -> String {
        if self.description.is_empty() {
            self.kind.name().to_owned()
        } else {
            self.description.clone()
        }
    }
}

/// Whether an effect actually did something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectResolution {
    Applied,
    ConditionNotMet,
}

/// Mutable view handed to effect implementations.
pub struct EffectContext<'a> {
    pub state: &'a mut GameState,
    /// Player who controls the effect.
    pub controller: PlayerId,
    /// Card the effect comes from, if any.
    pub source: Option<CardInstanceId>,
    pub events: &'a mut Vec<GameEvent>,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        state: &'a mut GameState,
        controller: PlayerId,
        source: Option<CardInstanceId>,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            state,
            controller,
            source,
            events,
        }
    }

    pub fn player(&self, who: PlayerRef) -> Result<PlayerId, EffectError> {
        match who {
            PlayerRef::Controller => Ok(self.controller),
            PlayerRef::Opponent => self
                .state
                .opponent_of(self.controller)
                .ok_or(EffectError::UnknownPlayer(self.controller)),
        }
    }

    /// Resolves a player-shaped target.
    pub fn target_player(
        &self,
        effect: &'static str,
        target: EffectTarget,
    ) -> Result<PlayerId, EffectError> {
        match target {
            EffectTarget::Player(who) => self.player(who),
            _ => Err(EffectError::InvalidTarget { effect, target }),
        }
    }

    /// Resolves a character-shaped target to the characters currently in play.
    ///
    /// Single-card targets must exist; `AllCharacters` may resolve to nothing.
    pub fn target_characters(
        &self,
        effect: &'static str,
        target: EffectTarget,
    ) -> Result<Vec<CardInstanceId>, EffectError> {
        let single = |id: CardInstanceId| {
            self.state
                .card_in_play(id)
                .filter(|card| card.is_character())
                .map(|card| vec![card.id()])
                .ok_or(EffectError::TargetNotFound(target))
        };

        match target {
            EffectTarget::Player(_) => Err(EffectError::InvalidTarget { effect, target }),
            EffectTarget::Source => {
                let source = self.source.ok_or(EffectError::TargetNotFound(target))?;
                single(source)
            }
            EffectTarget::Card(id) => single(id),
            EffectTarget::FirstFrontLine(who) => {
                let player = self.player(who)?;
                self.state
                    .player(player)
                    .and_then(|state| {
                        state
                            .board
                            .front_line
                            .iter()
                            .find(|card| card.is_character())
                    })
                    .map(|card| vec![card.id()])
                    .ok_or(EffectError::TargetNotFound(target))
            }
            EffectTarget::AllCharacters(who) => {
                let player = self.player(who)?;
                let state = self
                    .state
                    .player(player)
                    .ok_or(EffectError::UnknownPlayer(player))?;
                Ok(state
                    .board
                    .front_line
                    .iter()
                    .filter(|card| card.is_character())
                    .map(|card| card.id())
                    .collect())
            }
        }
    }
}

/// Resolves one effect against the state.
///
/// An unmet condition is not an error. Errors are scoped to this effect; the
/// caller decides whether they fail the enclosing action.
pub fn apply_effect(
    ctx: &mut EffectContext<'_>,
    effect: &Effect,
) -> Result<EffectResolution, EffectError> {
    if let Some(condition) = &effect.condition
        && !condition.evaluate(ctx.state, ctx.controller)?
    {
        return Ok(EffectResolution::ConditionNotMet);
    }

    let target = effect.target;
    match &effect.kind {
        EffectKind::Damage(damage) => damage.apply(ctx, target)?,
        EffectKind::Draw(draw) => draw.apply(ctx, target)?,
        EffectKind::Boost(boost) => boost.apply(ctx, target)?,
        EffectKind::Energy(energy) => energy.apply(ctx, target)?,
        EffectKind::Debuff(debuff) => debuff.apply(ctx, target)?,
        EffectKind::Destroy(destroy) => destroy.apply(ctx, target)?,
        EffectKind::Move(movement) => movement.apply(ctx, target)?,
        EffectKind::ReturnToHand(bounce) => bounce.apply(ctx, target)?,
        EffectKind::Heal { .. } | EffectKind::Search { .. } | EffectKind::Summon { .. } => {
            return Err(EffectError::NotSupported(effect.kind.name()));
        }
    }

    ctx.events.push(GameEvent::TriggerFired {
        source: ctx.source,
        effect: effect.label(),
    });
    Ok(EffectResolution::Applied)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::state::Zone;

    #[test]
    fn unmet_condition_is_a_silent_noop() {
        let mut state = session();
        let before = state.clone();
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Draw(DrawEffect { count: 2 }),
            EffectTarget::Player(PlayerRef::Controller),
        )
        .when(Condition::TurnNumber {
            min: Some(5),
            max: None,
        });

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        let resolution = apply_effect(&mut ctx, &effect).unwrap();

        assert_eq!(resolution, EffectResolution::ConditionNotMet);
        assert_eq!(state, before);
        assert!(events.is_empty());
    }

    #[test]
    fn unsupported_variants_report_not_supported() {
        let mut state = session();
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Heal { amount: 1 },
            EffectTarget::Player(PlayerRef::Controller),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        assert_eq!(
            apply_effect(&mut ctx, &effect),
            Err(EffectError::NotSupported("heal"))
        );
    }

    #[test]
    fn draw_rejects_character_target() {
        let mut state = session();
        let id = put_character(&mut state, ALICE, 1, 3000, Zone::FrontLine, 0);
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Draw(DrawEffect { count: 1 }),
            EffectTarget::Card(id),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        assert!(matches!(
            apply_effect(&mut ctx, &effect),
            Err(EffectError::InvalidTarget { effect: "draw", .. })
        ));
    }
}
