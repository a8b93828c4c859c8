//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a session can
//! be driven by human input, scripted fixtures, or AI policies.
use async_trait::async_trait;
use battle_core::{
    Action, AttackAction, Card, CardType, EndPhaseAction, GameState, Phase, PlayCardAction,
    PlayerId, PlayerState, Zone,
};

use super::errors::{Result, RuntimeError};

/// Trait for providing actions based on the current game state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `player`, who is the active player in `state`.
    async fn provide_action(&self, player: PlayerId, state: &GameState) -> Result<Action>;
}

/// A provider that always ends the current phase.
/// Useful for testing or as a fallback.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn provide_action(&self, player: PlayerId, _state: &GameState) -> Result<Action> {
        Ok(Action::new(player, EndPhaseAction {}))
    }
}

/// Greedy policy: develops fields and characters, then attacks the player
/// with every ready character.
///
/// Only proposes actions it expects to be legal; the caller still has to
/// handle a rejection (for example by ending the phase).
pub struct AggressiveActionProvider;

impl AggressiveActionProvider {
    fn affordable(player: &PlayerState, card: &Card) -> bool {
        card.definition.ap_cost <= player.ap
            && player.missing_energy(&card.definition.energy_cost).is_none()
    }

    fn next_play(player: &PlayerState) -> Option<PlayCardAction> {
        let has_room = |zone| player.board.free_slot(zone).is_some();
        let fields = player
            .hand
            .iter()
            .filter(|card| card.card_type() == CardType::Field && has_room(Zone::EnergyLine));
        let characters = player
            .hand
            .iter()
            .filter(|card| card.card_type() == CardType::Character && has_room(Zone::FrontLine));

        fields
            .chain(characters)
            .find(|card| Self::affordable(player, card))
            .map(|card| PlayCardAction::new(card.id))
    }
}

#[async_trait]
impl ActionProvider for AggressiveActionProvider {
    async fn provide_action(&self, player: PlayerId, state: &GameState) -> Result<Action> {
        let me = state
            .player(player)
            .ok_or(RuntimeError::NoActionAvailable(player))?;

        let action = match state.turn.phase {
            Phase::Main => Self::next_play(me).map(|play| Action::new(player, play)),
            Phase::Attack => me
                .board
                .front_line
                .iter()
                .find(|card| card.is_character() && card.can_attack())
                .map(|card| Action::new(player, AttackAction::player(card.id()))),
            _ => None,
        };

        Ok(action.unwrap_or_else(|| Action::new(player, EndPhaseAction {})))
    }
}
