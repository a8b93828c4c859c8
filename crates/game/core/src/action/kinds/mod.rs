//! One transition per player action.

mod attack;
mod draw;
mod move_character;
mod phase;
mod play_card;
mod surrender;

pub use attack::AttackAction;
pub use draw::{DrawCardAction, ExtraDrawAction};
pub use move_character::MoveCharacterAction;
pub use phase::{EndPhaseAction, EndTurnAction};
pub use play_card::PlayCardAction;
pub use surrender::SurrenderAction;

use crate::action::ActionError;
use crate::state::{GameState, PlayerId, PlayerState};

pub(crate) fn actor_state(state: &GameState, actor: PlayerId) -> Result<&PlayerState, ActionError> {
    state.player(actor).ok_or(ActionError::UnknownPlayer(actor))
}

pub(crate) fn actor_state_mut(
    state: &mut GameState,
    actor: PlayerId,
) -> Result<&mut PlayerState, ActionError> {
    state
        .player_mut(actor)
        .ok_or(ActionError::UnknownPlayer(actor))
}
