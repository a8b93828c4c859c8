//! Damage effect implementation.

use crate::event::GameEvent;
use crate::state::PlayerId;

use super::displacement::retire_character;
use super::error::EffectError;
use super::{EffectContext, EffectTarget};

/// Deal damage to a player or to characters.
///
/// Against a player, `amount` life cards move from the top of the life area to
/// the graveyard without resolving their life triggers. Against a character,
/// the character is retired when its effective BP is at most `amount`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub amount: u32,
}

impl DamageEffect {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        if let EffectTarget::Player(who) = target {
            let player = ctx.player(who)?;
            return self.damage_player(ctx, player);
        }

        for card in ctx.target_characters("damage", target)? {
            let Some(bp) = ctx.state.card_in_play(card).map(|c| c.effective_bp()) else {
                continue;
            };
            if bp <= self.amount {
                retire_character(ctx.state, card, ctx.events);
            }
        }
        Ok(())
    }

    fn damage_player(
        &self,
        ctx: &mut EffectContext<'_>,
        player: PlayerId,
    ) -> Result<(), EffectError> {
        let state = ctx
            .state
            .player_mut(player)
            .ok_or(EffectError::UnknownPlayer(player))?;

        let count = (self.amount as usize).min(state.life_area.len());
        for card in state.life_area.drain(..count) {
            ctx.events.push(GameEvent::LifeCardRevealed {
                player,
                card: card.id,
            });
            state.board.graveyard.push(card);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::action::effect::{Effect, EffectKind, PlayerRef, apply_effect};
    use crate::state::{CardInstanceId, Zone};

    #[test]
    fn player_damage_is_capped_by_life_area() {
        let mut state = session();
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Damage(DamageEffect::new(5)),
            EffectTarget::Player(PlayerRef::Opponent),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        let bob = state.player(BOB).unwrap();
        assert!(bob.life_area.is_empty());
        assert_eq!(bob.board.graveyard.len(), 3);
        let revealed = events
            .iter()
            .filter(|event| matches!(event, GameEvent::LifeCardRevealed { .. }))
            .count();
        assert_eq!(revealed, 3);
    }

    #[test]
    fn sweep_retires_only_characters_at_or_below_amount() {
        let mut state = session();
        let weak = put_character(&mut state, BOB, 1, 2500, Zone::FrontLine, 0);
        let strong = put_character(&mut state, BOB, 2, 3000, Zone::FrontLine, 1);
        let resting = put_character(&mut state, BOB, 3, 1000, Zone::EnergyLine, 0);
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Damage(DamageEffect::new(2500)),
            EffectTarget::AllCharacters(PlayerRef::Opponent),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        assert!(state.card_in_play(weak).is_none());
        assert!(state.card_in_play(strong).is_some());
        assert!(state.card_in_play(resting).is_some());
    }

    #[test]
    fn missing_card_target_is_not_found() {
        let mut state = session();
        let mut events = Vec::new();
        let target = EffectTarget::Card(CardInstanceId(999));
        let effect = Effect::new(EffectKind::Damage(DamageEffect::new(1)), target);

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        assert_eq!(
            apply_effect(&mut ctx, &effect),
            Err(EffectError::TargetNotFound(target))
        );
    }
}
