//! Effects that take characters out of play or relocate them.

use crate::event::GameEvent;
use crate::state::{BoardError, CardInstanceId, GameState, Zone};

use super::error::EffectError;
use super::trigger::{TriggerData, TriggerEvent, process_triggers};
use super::{EffectContext, EffectTarget};

/// Retires `card` from whichever board holds it, emits `CharacterDestroyed`
/// and fires `CharacterDestroyed` triggers for its owner.
///
/// Every retirement goes through here, whether from combat or an effect.
/// Returns `false` when the card is no longer in play.
pub(crate) fn retire_character(
    state: &mut GameState,
    card: CardInstanceId,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(owner) = state.owner_of(card) else {
        return false;
    };
    let retired = state
        .player_mut(owner)
        .and_then(|player| player.board.retire(card))
        .is_some();
    if retired {
        events.push(GameEvent::CharacterDestroyed { owner, card });
        process_triggers(
            state,
            TriggerEvent::CharacterDestroyed,
            &TriggerData::new(owner, Some(card)),
            events,
        );
    }
    retired
}

/// Retire the target regardless of BP.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestroyEffect {}

impl DestroyEffect {
    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        for card in ctx.target_characters("destroy", target)? {
            retire_character(ctx.state, card, ctx.events);
        }
        Ok(())
    }
}

/// Relocate a character to the other line, taking the lowest free slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEffect {
    pub to: Zone,
}

impl MoveEffect {
    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        for card in ctx.target_characters("move", target)? {
            let owner = ctx
                .state
                .owner_of(card)
                .ok_or(EffectError::TargetNotFound(target))?;
            let board = &mut ctx
                .state
                .player_mut(owner)
                .ok_or(EffectError::UnknownPlayer(owner))?
                .board;

            let from = board
                .find(card)
                .map(|in_play| in_play.position.zone)
                .ok_or(EffectError::TargetNotFound(target))?;
            if from == self.to {
                continue;
            }
            let slot = board
                .free_slot(self.to)
                .ok_or(EffectError::ZoneFull(self.to))?;
            let mut moving = board
                .take(card)
                .ok_or(EffectError::TargetNotFound(target))?;
            moving.position.zone = self.to;
            moving.position.slot = slot;
            board.place(moving).map_err(|err| match err {
                BoardError::ZoneFull(zone) => EffectError::ZoneFull(zone),
                _ => EffectError::ZoneFull(self.to),
            })?;

            ctx.events.push(GameEvent::CharacterMoved {
                player: owner,
                card,
                from,
                to: self.to,
            });
        }
        Ok(())
    }
}

/// Return characters to their owner's hand.
///
/// With `max_bp` set, only characters whose effective BP is at most that
/// value leave play. Modifiers and status are lost with the board entry.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnToHandEffect {
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_bp: Option<u32>,
}

impl ReturnToHandEffect {
    pub fn up_to(max_bp: u32) -> Self {
        Self {
            max_bp: Some(max_bp),
        }
    }

    pub fn apply(&self, ctx: &mut EffectContext<'_>, target: EffectTarget) -> Result<(), EffectError> {
        for card in ctx.target_characters("return_to_hand", target)? {
            let Some(in_play) = ctx.state.card_in_play(card) else {
                continue;
            };
            if self.max_bp.is_some_and(|max| in_play.effective_bp() > max) {
                continue;
            }
            let owner = in_play.owner;
            let player = ctx
                .state
                .player_mut(owner)
                .ok_or(EffectError::UnknownPlayer(owner))?;
            let returned = player
                .board
                .take(card)
                .ok_or(EffectError::TargetNotFound(target))?;
            player.hand.push(returned.card);

            ctx.events.push(GameEvent::CharacterReturned { owner, card });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::action::effect::{
        DrawEffect, Effect, EffectKind, PlayerRef, TriggerEvent, TriggeredEffect, apply_effect,
    };

    #[test]
    fn destroy_retires_into_outside_area_and_graveyard() {
        let mut state = session();
        let id = put_character(&mut state, BOB, 5, 9000, Zone::FrontLine, 2);
        let mut events = Vec::new();
        let effect = Effect::new(EffectKind::Destroy(DestroyEffect {}), EffectTarget::Card(id));

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        let bob = state.player(BOB).unwrap();
        assert!(bob.board.front_line.is_empty());
        assert_eq!(bob.board.outside_area[0].id, id);
        assert_eq!(bob.board.graveyard[0].id, id);
        assert!(events.contains(&GameEvent::CharacterDestroyed { owner: BOB, card: id }));
    }

    #[test]
    fn move_fails_when_destination_is_full() {
        let mut state = session();
        for slot in 0..4 {
            put_character(&mut state, ALICE, 10 + slot as u32, 1000, Zone::EnergyLine, slot);
        }
        let mover = put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 0);
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Move(MoveEffect {
                to: Zone::EnergyLine,
            }),
            EffectTarget::Card(mover),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        assert_eq!(
            apply_effect(&mut ctx, &effect),
            Err(EffectError::ZoneFull(Zone::EnergyLine))
        );
        assert!(state.player(ALICE).unwrap().board.front_line.len() == 1);
    }

    #[test]
    fn move_relocates_first_front_line_character() {
        let mut state = session();
        let mover = put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 3);
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::Move(MoveEffect {
                to: Zone::EnergyLine,
            }),
            EffectTarget::FirstFrontLine(PlayerRef::Controller),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        let placed = state.card_in_play(mover).unwrap();
        assert_eq!(placed.position.zone, Zone::EnergyLine);
        assert_eq!(placed.position.slot, 0);
    }

    #[test]
    fn destroy_effect_fires_destroyed_triggers() {
        let mut state = session();
        let victim = put_character(&mut state, BOB, 5, 9000, Zone::FrontLine, 0);
        let mourner = put_character(&mut state, BOB, 6, 1000, Zone::EnergyLine, 0);
        state
            .card_in_play_mut(mourner)
            .unwrap()
            .card
            .definition
            .triggers
            .push(TriggeredEffect::new(
                TriggerEvent::CharacterDestroyed,
                Effect::new(
                    EffectKind::Draw(DrawEffect { count: 1 }),
                    EffectTarget::Player(PlayerRef::Controller),
                ),
            ));
        let mut events = Vec::new();
        let effect = Effect::new(EffectKind::Destroy(DestroyEffect {}), EffectTarget::Card(victim));

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        assert!(state.card_in_play(victim).is_none());
        assert_eq!(state.player(BOB).unwrap().hand.len(), 1);
        let destroyed = events
            .iter()
            .position(|event| matches!(event, GameEvent::CharacterDestroyed { card, .. } if *card == victim))
            .unwrap();
        let fired = events
            .iter()
            .position(|event| matches!(event, GameEvent::TriggerFired { source: Some(source), .. } if *source == mourner))
            .unwrap();
        assert!(destroyed < fired);
    }

    #[test]
    fn return_to_hand_respects_bp_ceiling() {
        let mut state = session();
        let light = put_character(&mut state, BOB, 5, 3500, Zone::FrontLine, 0);
        let heavy = put_character(&mut state, BOB, 6, 4000, Zone::FrontLine, 1);
        let mut events = Vec::new();
        let effect = Effect::new(
            EffectKind::ReturnToHand(ReturnToHandEffect::up_to(3500)),
            EffectTarget::AllCharacters(PlayerRef::Opponent),
        );

        let mut ctx = EffectContext::new(&mut state, ALICE, None, &mut events);
        apply_effect(&mut ctx, &effect).unwrap();

        let bob = state.player(BOB).unwrap();
        assert_eq!(bob.hand.iter().map(|card| card.id).collect::<Vec<_>>(), vec![light]);
        assert!(bob.board.graveyard.is_empty());
        assert!(state.card_in_play(heavy).is_some());
        assert!(events.contains(&GameEvent::CharacterReturned { owner: BOB, card: light }));
    }
}
