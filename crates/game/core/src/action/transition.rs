use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{GameState, PlayerId};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The hooks receive
/// read-only access to deterministic environment facts via `Env` and must stay
/// side-effect free. Actor identity and the phase gate are checked by the
/// engine before any hook runs.
pub trait ActionTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _actor: PlayerId,
        _state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations should
    /// assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        actor: PlayerId,
        state: &mut GameState,
        env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _actor: PlayerId,
        _state: &GameState,
        _env: &GameEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
