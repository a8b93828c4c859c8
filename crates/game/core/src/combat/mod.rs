//! Combat resolution.
//!
//! Two entry points, both called by [`crate::action::AttackAction`] after the
//! attack has been validated and its declaration triggers have fired:
//!
//! - [`attack_player`]: reveal life cards from the defender's life area
//! - [`attack_character`]: BP contest against a front-line character
//!
//! Both rest the attacker, which also clears `CAN_ATTACK`.

use crate::action::ActionError;
use crate::action::effect::{resolve_life_trigger, retire_character};
use crate::event::GameEvent;
use crate::state::{CardInPlay, CardInstanceId, GameState, Keyword, PlayerId};

/// Life cards an attack on a player reveals.
pub fn damage_of(attacker: &CardInPlay) -> u32 {
    if attacker.card.definition.has_keyword(Keyword::DoubleDamage) {
        2
    } else {
        1
    }
}

/// Outcome of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackResult {
    /// Life cards actually revealed; fewer than the damage when the area ran out.
    PlayerHit { revealed: u32 },
    /// Attacker's BP was at least the defender's; the defender was retired.
    BattleWon { attacker_bp: u32, defender_bp: u32 },
    BattleLost { attacker_bp: u32, defender_bp: u32 },
}

fn ready_attacker(
    state: &GameState,
    attacker: CardInstanceId,
) -> Result<(&CardInPlay, PlayerId), ActionError> {
    let owner = state
        .owner_of(attacker)
        .ok_or(ActionError::CharacterNotFound(attacker))?;
    let card = state
        .card_in_play(attacker)
        .filter(|card| card.is_character())
        .ok_or(ActionError::CharacterNotFound(attacker))?;
    if !card.can_attack() {
        return Err(ActionError::AttackerNotReady(attacker));
    }
    Ok((card, owner))
}

fn rest(state: &mut GameState, attacker: CardInstanceId) {
    if let Some(card) = state.card_in_play_mut(attacker) {
        card.rest();
    }
}

/// Attacks the opponent of the attacker's owner directly.
///
/// Each revealed card resolves its life trigger for the defender, then goes
/// to the defender's graveyard.
pub fn attack_player(
    state: &mut GameState,
    attacker: CardInstanceId,
    events: &mut Vec<GameEvent>,
) -> Result<AttackResult, ActionError> {
    let (card, owner) = ready_attacker(state, attacker)?;
    let damage = damage_of(card);
    let defender = state
        .opponent_of(owner)
        .ok_or(ActionError::UnknownPlayer(owner))?;

    let life = state
        .player(defender)
        .map(|player| player.life_area.len())
        .unwrap_or(0);
    let revealed = (damage as usize).min(life) as u32;
    events.push(GameEvent::PlayerAttacked {
        attacker,
        defender,
        damage,
        revealed,
    });

    for _ in 0..revealed {
        let Some(card) = state
            .player_mut(defender)
            .filter(|player| !player.life_area.is_empty())
            .map(|player| player.life_area.remove(0))
        else {
            break;
        };
        events.push(GameEvent::LifeCardRevealed {
            player: defender,
            card: card.id,
        });
        resolve_life_trigger(state, defender, &card, events);
        if let Some(player) = state.player_mut(defender) {
            player.board.graveyard.push(card);
        }
    }

    rest(state, attacker);
    Ok(AttackResult::PlayerHit { revealed })
}

/// BP contest between the attacker and a character on the opposing front line.
///
/// The attacker wins ties. A losing attacker stays in play.
pub fn attack_character(
    state: &mut GameState,
    attacker: CardInstanceId,
    defender: CardInstanceId,
    events: &mut Vec<GameEvent>,
) -> Result<AttackResult, ActionError> {
    let (card, owner) = ready_attacker(state, attacker)?;
    let attacker_bp = card.effective_bp();

    let defending_player = state
        .opponent_of(owner)
        .ok_or(ActionError::UnknownPlayer(owner))?;
    let defender_bp = state
        .player(defending_player)
        .and_then(|player| player.board.front_line.iter().find(|c| c.id() == defender))
        .filter(|card| card.is_character())
        .map(|card| card.effective_bp())
        .ok_or(ActionError::DefenderNotFound(defender))?;

    let result = if attacker_bp >= defender_bp {
        events.push(GameEvent::BattleWon {
            attacker,
            defender,
            attacker_bp,
            defender_bp,
        });
        retire_character(state, defender, events);
        AttackResult::BattleWon {
            attacker_bp,
            defender_bp,
        }
    } else {
        events.push(GameEvent::BattleLost {
            attacker,
            defender,
            attacker_bp,
            defender_bp,
        });
        AttackResult::BattleLost {
            attacker_bp,
            defender_bp,
        }
    };

    rest(state, attacker);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::state::{CardStatus, LifeTrigger, Modifier, ModifierDuration, Zone};

    #[test]
    fn six_thousand_beats_fifty_five_hundred() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 6000, Zone::FrontLine, 0);
        let defender = put_character(&mut state, BOB, 2, 5500, Zone::FrontLine, 0);
        let mut events = Vec::new();

        let result = attack_character(&mut state, attacker, defender, &mut events).unwrap();

        assert_eq!(
            result,
            AttackResult::BattleWon {
                attacker_bp: 6000,
                defender_bp: 5500
            }
        );
        let bob = state.player(BOB).unwrap();
        assert!(bob.board.front_line.is_empty());
        assert_eq!(bob.board.outside_area[0].id, defender);
        assert_eq!(bob.board.graveyard[0].id, defender);

        let rested = state.card_in_play(attacker).unwrap();
        assert!(rested.status.contains(CardStatus::RESTED));
        assert!(!rested.status.contains(CardStatus::CAN_ATTACK));
    }

    #[test]
    fn attacker_wins_ties_and_loses_quietly() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 3000, Zone::FrontLine, 0);
        let tie = put_character(&mut state, BOB, 2, 3000, Zone::FrontLine, 0);
        let wall = put_character(&mut state, BOB, 3, 3500, Zone::FrontLine, 1);
        let mut events = Vec::new();

        assert!(matches!(
            attack_character(&mut state, attacker, tie, &mut events),
            Ok(AttackResult::BattleWon { .. })
        ));

        state.card_in_play_mut(attacker).unwrap().refresh();
        assert!(matches!(
            attack_character(&mut state, attacker, wall, &mut events),
            Ok(AttackResult::BattleLost { .. })
        ));
        assert!(state.card_in_play(attacker).is_some());
        assert!(state.card_in_play(wall).is_some());
    }

    #[test]
    fn boosts_count_toward_effective_bp() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 2000, Zone::FrontLine, 0);
        let defender = put_character(&mut state, BOB, 2, 4000, Zone::FrontLine, 0);
        state
            .card_in_play_mut(attacker)
            .unwrap()
            .modifiers
            .push(Modifier::bp_boost(2500, ModifierDuration::Turns(1), None, 1));
        let mut events = Vec::new();

        assert!(matches!(
            attack_character(&mut state, attacker, defender, &mut events),
            Ok(AttackResult::BattleWon {
                attacker_bp: 4500,
                ..
            })
        ));
    }

    #[test]
    fn double_damage_against_single_life_card_reveals_one() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 0);
        state
            .card_in_play_mut(attacker)
            .unwrap()
            .card
            .definition
            .keywords
            .push(Keyword::DoubleDamage);
        state.players[1].life_area.truncate(1);
        let mut events = Vec::new();

        let result = attack_player(&mut state, attacker, &mut events).unwrap();

        assert_eq!(result, AttackResult::PlayerHit { revealed: 1 });
        let bob = state.player(BOB).unwrap();
        assert!(bob.life_area.is_empty());
        assert_eq!(bob.board.graveyard.len(), 1);
        assert!(events.contains(&GameEvent::PlayerAttacked {
            attacker,
            defender: BOB,
            damage: 2,
            revealed: 1
        }));
    }

    #[test]
    fn revealed_life_card_fires_its_trigger() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 0);
        state.players[1].life_area[0].definition.life_trigger = LifeTrigger::DrawCard;
        let mut events = Vec::new();

        attack_player(&mut state, attacker, &mut events).unwrap();

        let bob = state.player(BOB).unwrap();
        assert_eq!(bob.life_area.len(), 2);
        assert_eq!(bob.hand.len(), 1);
    }

    #[test]
    fn rested_character_cannot_attack() {
        let mut state = session();
        let attacker = put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 0);
        state.card_in_play_mut(attacker).unwrap().rest();
        let mut events = Vec::new();

        assert_eq!(
            attack_player(&mut state, attacker, &mut events),
            Err(ActionError::AttackerNotReady(attacker))
        );
    }
}
