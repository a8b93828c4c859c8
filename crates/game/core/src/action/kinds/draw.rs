//! Start-phase draws.
//!
//! `DRAW_CARD` may be repeated while the deck lasts; `EXTRA_DRAW` is limited
//! to once per turn and moves the turn on to `Move`.

use crate::action::{ActionError, ActionTransition};
use crate::engine::turns;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{GameState, PlayerId};

use super::{actor_state, actor_state_mut};

fn draw_one(
    state: &mut GameState,
    actor: PlayerId,
    events: &mut Vec<GameEvent>,
) -> Result<(), ActionError> {
    let card = actor_state_mut(state, actor)?
        .draw()
        .ok_or(ActionError::DeckEmpty)?;
    events.push(GameEvent::CardDrawn {
        player: actor,
        card,
    });
    Ok(())
}

/// Draw the top card of the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawCardAction {}

impl ActionTransition for DrawCardAction {
    type Error = ActionError;

    fn pre_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        if actor_state(state, actor)?.deck.is_empty() {
            return Err(ActionError::DeckEmpty);
        }
        Ok(())
    }

    fn apply(
        &self,
        actor: PlayerId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        draw_one(state, actor, events)
    }
}

/// Pay AP to draw one more card, then advance to `Move`. Once per turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraDrawAction {}

impl ActionTransition for ExtraDrawAction {
    type Error = ActionError;

    fn pre_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        let player = actor_state(state, actor)?;
        let cost = env.config().extra_draw_cost;

        if player.extra_draw_used {
            return Err(ActionError::ExtraDrawUsed);
        }
        if player.ap < cost {
            return Err(ActionError::InsufficientAp {
                required: cost,
                available: player.ap,
            });
        }
        if player.deck.is_empty() {
            return Err(ActionError::DeckEmpty);
        }
        Ok(())
    }

    fn apply(
        &self,
        actor: PlayerId,
        state: &mut GameState,
        env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let cost = env.config().extra_draw_cost;
        let player = actor_state_mut(state, actor)?;
        if !player.spend_ap(cost) {
            return Err(ActionError::InsufficientAp {
                required: cost,
                available: player.ap,
            });
        }
        player.extra_draw_used = true;
        draw_one(state, actor, events)?;
        turns::advance_phase(state, events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::config::GameConfig;
    use crate::state::Phase;

    #[test]
    fn extra_draw_costs_ap_once_per_turn() {
        let mut state = session();
        state.players[0].ap = 2;
        let config = GameConfig::default();
        let env = GameEnv::rules_only(&config);
        let mut events = Vec::new();

        let action = ExtraDrawAction {};
        action.pre_validate(ALICE, &state, &env).unwrap();
        action.apply(ALICE, &mut state, &env, &mut events).unwrap();

        assert_eq!(state.turn.phase, Phase::Move);
        assert_eq!(
            events.last(),
            Some(&GameEvent::PhaseChanged {
                from: Phase::Start,
                to: Phase::Move
            })
        );
        let alice = state.player(ALICE).unwrap();
        assert_eq!(alice.ap, 1);
        assert_eq!(alice.hand.len(), 1);
        assert!(alice.extra_draw_used);
        assert_eq!(
            action.pre_validate(ALICE, &state, &env),
            Err(ActionError::ExtraDrawUsed)
        );
    }

    #[test]
    fn extra_draw_needs_ap() {
        let state = session();
        let config = GameConfig::default();
        let env = GameEnv::rules_only(&config);

        assert_eq!(
            ExtraDrawAction {}.pre_validate(ALICE, &state, &env),
            Err(ActionError::InsufficientAp {
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn draw_from_empty_deck_is_rejected() {
        let mut state = session();
        state.players[0].deck.clear();
        let config = GameConfig::default();
        let env = GameEnv::rules_only(&config);

        assert_eq!(
            DrawCardAction {}.pre_validate(ALICE, &state, &env),
            Err(ActionError::DeckEmpty)
        );
    }

    #[test]
    fn draw_card_repeats_while_the_deck_lasts() {
        let mut state = session();
        let config = GameConfig::default();
        let env = GameEnv::rules_only(&config);
        let mut events = Vec::new();

        for _ in 0..3 {
            let action = DrawCardAction {};
            action.pre_validate(ALICE, &state, &env).unwrap();
            action.apply(ALICE, &mut state, &env, &mut events).unwrap();
        }

        assert_eq!(state.turn.phase, Phase::Start);
        assert_eq!(state.player(ALICE).unwrap().hand.len(), 3);
        assert_eq!(state.player(ALICE).unwrap().deck.len(), 7);
    }
}
