//! Card draw and energy manipulation.

use std::collections::BTreeMap;

use crate::event::GameEvent;
use crate::state::Color;

use super::error::EffectError;
use super::{EffectContext, EffectTarget};

/// Move cards from the top of the deck to the hand, capped by the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawEffect {
    pub count: u32,
}

impl DrawEffect {
    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        let player = ctx.target_player("draw", target)?;
        let state = ctx
            .state
            .player_mut(player)
            .ok_or(EffectError::UnknownPlayer(player))?;

        for card in state.draw_many(self.count as usize) {
            ctx.events.push(GameEvent::CardDrawn { player, card });
        }
        Ok(())
    }
}

/// Signed per-colour energy adjustment. Pools never drop below zero.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyEffect {
    pub delta: BTreeMap<Color, i32>,
}

impl EnergyEffect {
    pub fn with(mut self, color: Color, delta: i32) -> Self {
        self.delta.insert(color, delta);
        self
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        let player = ctx.target_player("energy", target)?;
        let state = ctx
            .state
            .player_mut(player)
            .ok_or(EffectError::UnknownPlayer(player))?;

        for (color, delta) in &self.delta {
            state.adjust_energy(*color, *delta);
        }
        ctx.events.push(GameEvent::EnergyChanged {
            player,
            energy: state.energy.clone(),
        });
        Ok(())
    }
}
