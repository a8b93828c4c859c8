//! BP modifiers: boosts and debuffs.

use crate::event::GameEvent;
use crate::state::{Modifier, ModifierDuration};

use super::error::EffectError;
use super::{EffectContext, EffectTarget};

fn attach(
    ctx: &mut EffectContext<'_>,
    effect: &'static str,
    target: EffectTarget,
    value: i32,
    duration: ModifierDuration,
) -> Result<(), EffectError> {
    let turn = ctx.state.turn.number;
    let source = ctx.source;
    for card in ctx.target_characters(effect, target)? {
        let in_play = ctx
            .state
            .card_in_play_mut(card)
            .ok_or(EffectError::TargetNotFound(target))?;
        in_play
            .modifiers
            .push(Modifier::bp_boost(value, duration, source, turn));
        ctx.events.push(GameEvent::ModifierApplied { card, value });
    }
    Ok(())
}

/// Raise BP for a duration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostEffect {
    pub amount: i32,
    pub duration: ModifierDuration,
}

impl BoostEffect {
    pub fn new(amount: i32, duration: ModifierDuration) -> Self {
        Self { amount, duration }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        attach(ctx, "boost", target, self.amount, self.duration)
    }
}

/// Lower BP for a duration. Effective BP floors at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffEffect {
    pub amount: u32,
    pub duration: ModifierDuration,
}

impl DebuffEffect {
    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        let value = -(self.amount.min(i32::MAX as u32) as i32);
        attach(ctx, "debuff", target, value, self.duration)
    }
}
