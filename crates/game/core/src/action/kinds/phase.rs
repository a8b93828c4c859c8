//! Phase and turn advancement.

use crate::action::{ActionError, ActionTransition};
use crate::engine::turns;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{GameState, PlayerId};

/// Advance to the next phase; leaving `End` hands the turn over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndPhaseAction {}

impl ActionTransition for EndPhaseAction {
    type Error = ActionError;

    fn apply(
        &self,
        _actor: PlayerId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        turns::advance_phase(state, events);
        Ok(())
    }
}

/// Jump to `End` from any phase, run end housekeeping and hand the turn over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction {}

impl ActionTransition for EndTurnAction {
    type Error = ActionError;

    fn apply(
        &self,
        _actor: PlayerId,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        turns::end_turn(state, events);
        Ok(())
    }

    fn post_validate(
        &self,
        actor: PlayerId,
        state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        debug_assert_ne!(state.turn.active_player, actor, "turn must change hands");
        Ok(())
    }
}
