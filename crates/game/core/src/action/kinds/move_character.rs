use crate::action::{ActionError, ActionTransition};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{CardInstanceId, GameState, PlayerId, Zone};

use super::{actor_state, actor_state_mut};

/// Relocate one of the actor's characters to the other line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCharacterAction {
    pub card: CardInstanceId,
    pub to: Zone,
    /// Destination slot; defaults to the lowest free one.
    pub slot: Option<u8>,
}

impl MoveCharacterAction {
    pub fn new(card: CardInstanceId, to: Zone) -> Self {
        Self {
            card,
            to,
            slot: None,
        }
    }

    fn current_zone(&self, state: &GameState, actor: PlayerId) -> Result<Zone, ActionError> {
        actor_state(state, actor)?
            .board
            .find(self.card)
            .filter(|card| card.is_character())
            .map(|card| card.position.zone)
            .ok_or(ActionError::CharacterNotFound(self.card))
    }
}

impl ActionTransition for MoveCharacterAction {
    type Error = ActionError;

    fn pre_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        if self.current_zone(state, actor)? == self.to {
            return Err(ActionError::AlreadyInZone(self.card, self.to));
        }
        actor_state(state, actor)?
            .board
            .target_slot(self.to, self.slot)?;
        Ok(())
    }

    fn apply(
        &self,
        actor: PlayerId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let from = self.current_zone(state, actor)?;
        let board = &mut actor_state_mut(state, actor)?.board;
        let slot = board.target_slot(self.to, self.slot)?;
        let mut card = board
            .take(self.card)
            .ok_or(ActionError::CharacterNotFound(self.card))?;
        card.position.zone = self.to;
        card.position.slot = slot;
        board.place(card)?;

        events.push(GameEvent::CharacterMoved {
            player: actor,
            card: self.card,
            from,
            to: self.to,
        });
        Ok(())
    }
}
