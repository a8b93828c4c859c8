use crate::action::effect::{TriggerData, TriggerEvent, process_triggers};
use crate::action::{ActionError, ActionTransition, AttackTarget};
use crate::combat;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{CardInstanceId, GameState, PlayerId};

use super::actor_state;

/// Declare an attack with a front-line character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker: CardInstanceId,
    pub target: AttackTarget,
}

impl AttackAction {
    pub fn player(attacker: CardInstanceId) -> Self {
        Self {
            attacker,
            target: AttackTarget::Player,
        }
    }

    pub fn character(attacker: CardInstanceId, defender: CardInstanceId) -> Self {
        Self {
            attacker,
            target: AttackTarget::Character(defender),
        }
    }
}

impl ActionTransition for AttackAction {
    type Error = ActionError;

    fn pre_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        let attacker = actor_state(state, actor)?
            .board
            .find(self.attacker)
            .filter(|card| card.is_character())
            .ok_or(ActionError::CharacterNotFound(self.attacker))?;
        if !attacker.can_attack() {
            return Err(ActionError::AttackerNotReady(self.attacker));
        }

        if let AttackTarget::Character(defender) = self.target {
            let opponent = state
                .opponent_of(actor)
                .ok_or(ActionError::UnknownPlayer(actor))?;
            let on_front_line = actor_state(state, opponent)?
                .board
                .front_line
                .iter()
                .any(|card| card.id() == defender && card.is_character());
            if !on_front_line {
                return Err(ActionError::DefenderNotFound(defender));
            }
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
        events.push(GameEvent::AttackDeclared {
            player: actor,
            attacker: self.attacker,
            target: self.target,
        });
        process_triggers(
            state,
            TriggerEvent::AttackDeclared,
            &TriggerData::new(actor, Some(self.attacker)),
            events,
        );

        match self.target {
            AttackTarget::Player => combat::attack_player(state, self.attacker, events)?,
            AttackTarget::Character(defender) => {
                combat::attack_character(state, self.attacker, defender, events)?
            }
        };
        Ok(())
    }

    fn post_validate(
        &self,
        _actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        if let Some(attacker) = state.card_in_play(self.attacker) {
            debug_assert!(!attacker.can_attack(), "attacker must be rested after combat");
        }
        Ok(())
    }
}
