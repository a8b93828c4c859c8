use crate::action::{ActionError, ActionTransition};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{GameState, PlayerId, WinReason};

/// Concede; the opponent wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurrenderAction {}

impl ActionTransition for SurrenderAction {
    type Error = ActionError;

    fn apply(
        &self,
        actor: PlayerId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let winner = state
            .opponent_of(actor)
            .ok_or(ActionError::UnknownPlayer(actor))?;
        state.declare_winner(winner, WinReason::Surrender, events);
        Ok(())
    }
}
