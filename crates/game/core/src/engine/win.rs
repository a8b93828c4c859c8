//! Win condition evaluation.

use crate::event::GameEvent;
use crate::state::{GameState, Phase, WinReason};

/// Declares a winner if either loss condition holds.
///
/// Runs after every processed submission. Does nothing before life areas are
/// dealt or once a winner is recorded. An empty life area is checked for the
/// active player first, then the opponent; deck-out only applies to the active
/// player during their Start phase.
pub(crate) fn check_win(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.life_areas_ready || state.is_over() {
        return;
    }

    let [active, opponent] = state.players_in_turn_order();
    let (active_id, opponent_id) = (active.id, opponent.id);
    let active_empty = active.life_area.is_empty();
    let opponent_empty = opponent.life_area.is_empty();
    let active_decked = active.deck.is_empty();

    if active_empty {
        state.declare_winner(opponent_id, WinReason::LifeAreaEmpty, events);
    } else if opponent_empty {
        state.declare_winner(active_id, WinReason::LifeAreaEmpty, events);
    } else if state.turn.phase == Phase::Start && active_decked {
        state.declare_winner(opponent_id, WinReason::DeckOut, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::state::GameOutcome;

    #[test]
    fn empty_life_area_loses() {
        let mut state = session();
        state.player_mut(BOB).unwrap().life_area.clear();
        let mut events = Vec::new();

        check_win(&mut state, &mut events);

        assert_eq!(
            state.outcome,
            Some(GameOutcome {
                winner: ALICE,
                loser: BOB,
                reason: WinReason::LifeAreaEmpty
            })
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn active_player_is_checked_first() {
        let mut state = session();
        state.player_mut(ALICE).unwrap().life_area.clear();
        state.player_mut(BOB).unwrap().life_area.clear();
        let mut events = Vec::new();

        check_win(&mut state, &mut events);

        assert_eq!(state.outcome.map(|o| o.winner), Some(BOB));
    }

    #[test]
    fn deck_out_only_in_start_phase() {
        let mut state = session();
        state.player_mut(ALICE).unwrap().deck.clear();
        state.turn.phase = Phase::Main;
        let mut events = Vec::new();

        check_win(&mut state, &mut events);
        assert!(state.outcome.is_none());

        state.turn.phase = Phase::Start;
        check_win(&mut state, &mut events);
        assert_eq!(
            state.outcome.map(|o| (o.loser, o.reason)),
            Some((ALICE, WinReason::DeckOut))
        );
    }

    #[test]
    fn nothing_happens_before_life_areas_are_dealt() {
        let mut state = session();
        state.life_areas_ready = false;
        state.player_mut(ALICE).unwrap().life_area.clear();
        let mut events = Vec::new();

        check_win(&mut state, &mut events);

        assert!(state.outcome.is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn winner_is_recorded_once() {
        let mut state = session();
        state.player_mut(BOB).unwrap().life_area.clear();
        let mut events = Vec::new();
        check_win(&mut state, &mut events);

        state.player_mut(ALICE).unwrap().life_area.clear();
        check_win(&mut state, &mut events);

        assert_eq!(state.outcome.map(|o| o.winner), Some(ALICE));
        assert_eq!(events.len(), 1);
    }
}
