//! Action transition dispatch.

use crate::action::{ActionParams, ActionTransition};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{GameState, PlayerId};

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    actor: PlayerId,
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(actor, state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(actor, state, env, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(actor, state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes typed params to their transition.
pub(super) fn execute_transition(
    params: &ActionParams,
    actor: PlayerId,
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), ExecuteError> {
    match params {
        ActionParams::DrawCard(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::DrawCard)
        }
        ActionParams::ExtraDraw(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::ExtraDraw)
        }
        ActionParams::PlayCard(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::PlayCard)
        }
        ActionParams::Attack(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::Attack)
        }
        ActionParams::MoveCharacter(transition) => {
            drive_transition(transition, actor, state, env, events)
                .map_err(ExecuteError::MoveCharacter)
        }
        ActionParams::EndPhase(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::EndPhase)
        }
        ActionParams::EndTurn(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::EndTurn)
        }
        ActionParams::Surrender(transition) => {
            drive_transition(transition, actor, state, env, events).map_err(ExecuteError::Surrender)
        }
    }
}
