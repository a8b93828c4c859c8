//! Playing a card from hand during the Main phase.
//!
//! Routing by card type:
//! - `Character` goes to the requested (or lowest free) slot of the front line,
//!   or the energy line when asked for
//! - `Field` goes to the energy line
//! - `Event` resolves its play effects, then goes to the graveyard
//! - `Ap` is never playable

use crate::action::effect::{
    EffectContext, TriggerData, TriggerEvent, apply_effect, process_triggers,
};
use crate::action::{ActionError, ActionTransition};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{
    BoardPosition, Card, CardInPlay, CardInstanceId, CardStatus, CardType, GameState, Keyword,
    PlayerId, PlayerState, Zone,
};

use super::{actor_state, actor_state_mut};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCardAction {
    pub card: CardInstanceId,
    /// Requested zone; characters default to the front line.
    pub zone: Option<Zone>,
    /// Requested slot; defaults to the lowest free one.
    pub slot: Option<u8>,
}

impl PlayCardAction {
    pub fn new(card: CardInstanceId) -> Self {
        Self {
            card,
            zone: None,
            slot: None,
        }
    }

    pub fn at(mut self, zone: Zone, slot: Option<u8>) -> Self {
        self.zone = Some(zone);
        self.slot = slot;
        self
    }

    /// Destination of a permanent, or `None` for events.
    fn destination(&self, player: &PlayerState, card: &Card) -> Result<Option<BoardPosition>, ActionError> {
        let zone = match card.card_type() {
            CardType::Character => self.zone.unwrap_or(Zone::FrontLine),
            CardType::Field => match self.zone {
                None | Some(Zone::EnergyLine) => Zone::EnergyLine,
                Some(zone) => {
                    return Err(ActionError::InvalidZone {
                        card_type: CardType::Field,
                        zone,
                    });
                }
            },
            CardType::Event => return Ok(None),
            CardType::Ap => return Err(ActionError::UnplayableCard(card.id)),
        };
        let slot = player.board.target_slot(zone, self.slot)?;
        Ok(Some(BoardPosition::new(zone, slot)))
    }
}

impl ActionTransition for PlayCardAction {
    type Error = ActionError;

    fn pre_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        let player = actor_state(state, actor)?;
        let card = player
            .hand
            .iter()
            .find(|card| card.id == self.card)
            .ok_or(ActionError::CardNotInHand(self.card))?;

        self.destination(player, card)?;

        let definition = &card.definition;
        if player.ap < definition.ap_cost {
            return Err(ActionError::InsufficientAp {
                required: definition.ap_cost,
                available: player.ap,
            });
        }
        if let Some((color, required, available)) = player.missing_energy(&definition.energy_cost) {
            return Err(ActionError::InsufficientEnergy {
                color,
                required,
                available,
            });
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
        let player = actor_state_mut(state, actor)?;
        let index = player
            .hand_index(self.card)
            .ok_or(ActionError::CardNotInHand(self.card))?;
        let destination = self.destination(player, &player.hand[index])?;
        let card = player.hand.remove(index);

        let definition = &card.definition;
        if !player.spend_ap(definition.ap_cost) {
            return Err(ActionError::InsufficientAp {
                required: definition.ap_cost,
                available: player.ap,
            });
        }
        if !definition.energy_cost.is_empty() {
            player.pay_energy(&definition.energy_cost);
            events.push(GameEvent::EnergyChanged {
                player: actor,
                energy: player.energy.clone(),
            });
        }

        let code = card.code().clone();
        match destination {
            Some(position) => {
                let status = match card.card_type() {
                    CardType::Character if card.definition.has_keyword(Keyword::Rush) => {
                        CardStatus::CAN_BLOCK | CardStatus::CAN_ATTACK
                    }
                    CardType::Character => CardStatus::CAN_BLOCK,
                    _ => CardStatus::empty(),
                };
                player
                    .board
                    .place(CardInPlay::new(card, position, status, actor))?;
                events.push(GameEvent::CardPlayed {
                    player: actor,
                    card: self.card,
                    code,
                    zone: Some(position.zone),
                });
            }
            None => {
                events.push(GameEvent::CardPlayed {
                    player: actor,
                    card: self.card,
                    code,
                    zone: None,
                });
                let mut ctx = EffectContext::new(state, actor, Some(self.card), events);
                for effect in &card.definition.on_play {
                    apply_effect(&mut ctx, effect)?;
                }
                actor_state_mut(state, actor)?.board.graveyard.push(card);
            }
        }

        process_triggers(
            state,
            TriggerEvent::CardPlayed,
            &TriggerData::new(actor, Some(self.card)),
            events,
        );
        Ok(())
    }

    fn post_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        debug_assert!(
            actor_state(state, actor)?.hand_index(self.card).is_none(),
            "played card must leave the hand"
        );
        Ok(())
    }
}
