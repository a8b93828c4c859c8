//! Random policy used by the simulator's second seat.
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{
    Action, AttackAction, CardType, EndPhaseAction, GameState, Phase, PlayCardAction, PlayerId,
    Zone,
};
use battle_runtime::{ActionProvider, Result, RuntimeError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks uniformly among a handful of plausible actions.
///
/// Candidates are not checked against every rule; the driver ends the phase
/// when the engine rejects one.
pub struct RandomActionProvider {
    rng: Mutex<StdRng>,
}

impl RandomActionProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn candidates(player: PlayerId, state: &GameState) -> Vec<Action> {
        let mut candidates = vec![Action::new(player, EndPhaseAction {})];
        let (Some(me), Some(foe)) = (
            state.player(player),
            state.opponent_of(player).and_then(|id| state.player(id)),
        ) else {
            return candidates;
        };

        match state.turn.phase {
            Phase::Main => {
                for card in &me.hand {
                    if card.definition.ap_cost > me.ap {
                        continue;
                    }
                    let play = match card.card_type() {
                        CardType::Field => me
                            .board
                            .free_slot(Zone::EnergyLine)
                            .map(|slot| PlayCardAction::new(card.id).at(Zone::EnergyLine, Some(slot))),
                        CardType::Character => me
                            .board
                            .free_slot(Zone::FrontLine)
                            .map(|slot| PlayCardAction::new(card.id).at(Zone::FrontLine, Some(slot))),
                        _ => Some(PlayCardAction::new(card.id)),
                    };
                    candidates.extend(play.map(|play| Action::new(player, play)));
                }
            }
            Phase::Attack => {
                for attacker in me.board.front_line.iter().filter(|card| card.can_attack()) {
                    candidates.push(Action::new(player, AttackAction::player(attacker.id())));
                    candidates.extend(
                        foe.board
                            .front_line
                            .iter()
                            .filter(|card| card.is_character())
                            .map(|defender| {
                                Action::new(
                                    player,
                                    AttackAction::character(attacker.id(), defender.id()),
                                )
                            }),
                    );
                }
            }
            _ => {}
        }

        candidates
    }
}

#[async_trait]
impl ActionProvider for RandomActionProvider {
    async fn provide_action(&self, player: PlayerId, state: &GameState) -> Result<Action> {
        let candidates = Self::candidates(player, state);
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RuntimeError::NoActionAvailable(player))?;

        // Lean towards acting rather than passing.
        if candidates.len() > 1 && rng.gen_bool(0.8) {
            return candidates[1..]
                .choose(&mut *rng)
                .cloned()
                .ok_or(RuntimeError::NoActionAvailable(player));
        }
        candidates
            .into_iter()
            .next()
            .ok_or(RuntimeError::NoActionAvailable(player))
    }
}
