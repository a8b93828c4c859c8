//! Phase progression and turn hand-over.
//!
//! A turn runs `Start → Move → Main → Attack → End`. Leaving `End` hands the
//! turn to the opponent, whose Start processing runs immediately.

use crate::action::effect::{TriggerData, TriggerEvent, process_triggers};
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::state::{EnergyMap, GameState, Phase};

/// Moves to the next phase, handing the turn over after `End`.
pub(crate) fn advance_phase(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let from = state.turn.phase;
    match from.next() {
        Some(to) => {
            state.turn.phase = to;
            events.push(GameEvent::PhaseChanged { from, to });
        }
        None => hand_over(state, events),
    }
}

/// Skips straight to `End` and hands the turn over.
pub(crate) fn end_turn(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let from = state.turn.phase;
    if from != Phase::End {
        state.turn.phase = Phase::End;
        events.push(GameEvent::PhaseChanged {
            from,
            to: Phase::End,
        });
    }
    hand_over(state, events);
}

/// End-of-turn housekeeping, then Start processing for the opponent.
fn hand_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let active = state.turn.active_player;
    process_triggers(
        state,
        TriggerEvent::TurnEnd,
        &TriggerData::new(active, None),
        events,
    );

    // Timed modifiers lose one turn at every end phase, whoever owns them.
    for player in state.players.iter_mut() {
        for card in player.board.permanents_mut() {
            card.modifiers.retain_mut(|modifier| modifier.tick());
        }
    }

    let player = state.active_player_mut();
    if player.hand.len() > GameConfig::HAND_LIMIT {
        let excess = player.hand.split_off(GameConfig::HAND_LIMIT);
        let removed = excess.iter().map(|card| card.id).collect();
        player.board.remove_area.extend(excess);
        events.push(GameEvent::HandTrimmed {
            player: active,
            removed,
        });
    }

    let Some(next) = state.opponent_of(active) else {
        return;
    };
    state.turn.number += 1;
    state.turn.active_player = next;
    state.turn.phase = Phase::Start;
    events.push(GameEvent::PhaseChanged {
        from: Phase::End,
        to: Phase::Start,
    });

    begin_turn(state, events);
}

/// Start processing for the active player: AP, refresh, draw and energy.
pub(crate) fn begin_turn(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let active = state.turn.active_player;
    let is_first = active == state.first_player();

    let player = state.active_player_mut();
    player.turns_taken += 1;
    player.max_ap = GameConfig::max_ap(is_first, player.turns_taken);
    player.ap = player.max_ap;
    player.extra_draw_used = false;
    for card in player.board.permanents_mut() {
        card.refresh();
    }

    // The first player skips the draw on their opening turn.
    let skip_draw = is_first && player.turns_taken == 1;
    if !skip_draw && let Some(card) = player.draw() {
        events.push(GameEvent::CardDrawn {
            player: active,
            card,
        });
    }

    let mut produced = EnergyMap::new();
    for card in player.board.permanents() {
        for (color, amount) in &card.card.definition.energy_produce {
            *produced.entry(*color).or_insert(0) += amount;
        }
    }
    if !produced.is_empty() {
        player.add_energy(&produced);
        events.push(GameEvent::EnergyProduced {
            player: active,
            produced,
        });
    }

    let max_ap = player.max_ap;
    events.push(GameEvent::TurnStarted {
        player: active,
        turn: state.turn.number,
        max_ap,
    });

    process_triggers(
        state,
        TriggerEvent::TurnStart,
        &TriggerData::new(active, None),
        events,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::action::effect::{
        DrawEffect, Effect, EffectKind, EffectTarget, PlayerRef, TriggeredEffect,
    };
    use crate::state::{
        BoardPosition, Card, CardDefinition, CardInPlay, CardInstanceId, CardStatus, CardType,
        Color, Modifier, ModifierDuration, Zone,
    };

    fn run_to_end(state: &mut GameState, events: &mut Vec<GameEvent>) {
        while state.turn.phase != Phase::End {
            advance_phase(state, events);
        }
    }

    #[test]
    fn phases_advance_in_order() {
        let mut state = session();
        let mut events = Vec::new();
        run_to_end(&mut state, &mut events);

        let phases: Vec<Phase> = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![Phase::Move, Phase::Main, Phase::Attack, Phase::End]
        );
        assert_eq!(state.turn.active_player, ALICE);
    }

    #[test]
    fn leaving_end_hands_over_and_starts_opponent_turn() {
        let mut state = session();
        state.turn.phase = Phase::End;
        let hand_before = state.player(BOB).unwrap().hand.len();
        let mut events = Vec::new();

        advance_phase(&mut state, &mut events);

        assert_eq!(state.turn.active_player, BOB);
        assert_eq!(state.turn.phase, Phase::Start);
        assert_eq!(state.turn.number, 2);
        let bob = state.player(BOB).unwrap();
        assert_eq!(bob.turns_taken, 1);
        assert_eq!(bob.max_ap, 2);
        assert_eq!(bob.ap, 2);
        assert_eq!(bob.hand.len(), hand_before + 1);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::TurnStarted { player, turn: 2, max_ap: 2 } if *player == BOB
        )));
    }

    #[test]
    fn ap_schedule_follows_each_players_own_turns() {
        let mut state = session();
        let mut events = Vec::new();
        begin_turn(&mut state, &mut events);

        let mut alice_ap = vec![state.player(ALICE).unwrap().max_ap];
        let mut bob_ap = Vec::new();
        for _ in 0..6 {
            end_turn(&mut state, &mut events);
            let active = state.active_player();
            if active.id == ALICE {
                alice_ap.push(active.max_ap);
            } else {
                bob_ap.push(active.max_ap);
            }
        }

        assert_eq!(alice_ap, vec![1, 2, 3, 3]);
        assert_eq!(bob_ap, vec![2, 2, 3]);
    }

    #[test]
    fn first_player_skips_opening_draw() {
        let mut state = session();
        let hand_before = state.player(ALICE).unwrap().hand.len();
        let mut events = Vec::new();

        begin_turn(&mut state, &mut events);

        assert_eq!(state.player(ALICE).unwrap().hand.len(), hand_before);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CardDrawn { .. })));
    }

    #[test]
    fn end_turn_from_main_jumps_to_end_first() {
        let mut state = session();
        state.turn.phase = Phase::Main;
        let mut events = Vec::new();

        end_turn(&mut state, &mut events);

        assert_eq!(
            events[0],
            GameEvent::PhaseChanged {
                from: Phase::Main,
                to: Phase::End
            }
        );
        assert_eq!(state.turn.active_player, BOB);
    }

    #[test]
    fn hand_is_trimmed_to_limit() {
        let mut state = session();
        {
            let alice = state.player_mut(ALICE).unwrap();
            alice.hand = (0..10).map(|i| filler(500 + i)).collect();
        }
        let mut events = Vec::new();

        end_turn(&mut state, &mut events);

        let alice = state.player(ALICE).unwrap();
        assert_eq!(alice.hand.len(), 8);
        assert_eq!(alice.board.remove_area.len(), 2);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::HandTrimmed { removed, .. }
                if removed == &vec![CardInstanceId(508), CardInstanceId(509)]
        )));
    }

    #[test]
    fn timed_modifiers_expire_at_end_phase() {
        let mut state = session();
        let id = put_character(&mut state, ALICE, 1, 3000, Zone::FrontLine, 0);
        state
            .card_in_play_mut(id)
            .unwrap()
            .modifiers
            .push(Modifier::bp_boost(2000, ModifierDuration::Turns(1), None, 1));
        let mut events = Vec::new();

        end_turn(&mut state, &mut events);

        let card = state.card_in_play(id).unwrap();
        assert!(card.modifiers.is_empty());
        assert_eq!(card.effective_bp(), 3000);
    }

    #[test]
    fn start_refreshes_and_produces_energy() {
        let mut state = session();
        let character = put_character(&mut state, BOB, 1, 3000, Zone::FrontLine, 0);
        state.card_in_play_mut(character).unwrap().rest();

        let definition = CardDefinition::new("F-001", "Well", CardType::Field, Color::Blue)
            .with_energy_produce(Color::Blue, 2);
        let field = CardInPlay::new(
            Card::new(CardInstanceId(2), definition),
            BoardPosition::new(Zone::EnergyLine, 0),
            CardStatus::empty(),
            BOB,
        );
        state.player_mut(BOB).unwrap().board.place(field).unwrap();
        state.turn.phase = Phase::End;
        let mut events = Vec::new();

        advance_phase(&mut state, &mut events);

        assert!(state.card_in_play(character).unwrap().can_attack());
        assert_eq!(state.player(BOB).unwrap().energy_of(Color::Blue), 2);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnergyProduced { .. })));
    }

    #[test]
    fn turn_start_triggers_fire_after_turn_started() {
        let mut state = session();
        let id = put_character(&mut state, BOB, 1, 3000, Zone::FrontLine, 0);
        state
            .card_in_play_mut(id)
            .unwrap()
            .card
            .definition
            .triggers
            .push(TriggeredEffect::new(
                TriggerEvent::TurnStart,
                Effect::new(
                    EffectKind::Draw(DrawEffect { count: 1 }),
                    EffectTarget::Player(PlayerRef::Controller),
                ),
            ));
        state.turn.phase = Phase::End;
        let mut events = Vec::new();

        advance_phase(&mut state, &mut events);

        let started = events
            .iter()
            .position(|e| matches!(e, GameEvent::TurnStarted { .. }))
            .unwrap();
        let fired = events
            .iter()
            .position(|e| matches!(e, GameEvent::TriggerFired { .. }))
            .unwrap();
        assert!(started < fired);
    }
}
