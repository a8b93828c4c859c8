//! Conditions for conditional effects.

use crate::state::{EnergyMap, GameState, PlayerId};

use super::PlayerRef;
use super::error::ConditionError;

/// Condition for conditional effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Condition {
    /// Characters on both lines of `player`, bounds inclusive.
    CharacterCount {
        player: PlayerRef,
        min: Option<u32>,
        max: Option<u32>,
    },

    /// Every listed colour is at least the required amount.
    EnergyAvailable { player: PlayerRef, energy: EnergyMap },

    /// Global turn number, bounds inclusive.
    TurnNumber { min: Option<u32>, max: Option<u32> },

    CardInHand { player: PlayerRef, count: u32 },

    HealthBelow { player: PlayerRef, threshold: u32 },

    /// All conditions must be true.
    And(Vec<Condition>),

    /// Any condition must be true.
    Or(Vec<Condition>),

    /// Condition must be false.
    Not(Box<Condition>),
}

fn within(value: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

impl Condition {
    /// Evaluates the condition from `controller`'s point of view.
    pub fn evaluate(&self, state: &GameState, controller: PlayerId) -> Result<bool, ConditionError> {
        let resolve = |who: PlayerRef| {
            let id = match who {
                PlayerRef::Controller => controller,
                PlayerRef::Opponent => state
                    .opponent_of(controller)
                    .ok_or(ConditionError::UnknownPlayer(controller))?,
            };
            state.player(id).ok_or(ConditionError::UnknownPlayer(id))
        };

        match self {
            Self::CharacterCount { player, min, max } => {
                let count = resolve(*player)?.board.character_count() as u32;
                Ok(within(count, *min, *max))
            }
            Self::EnergyAvailable { player, energy } => {
                Ok(resolve(*player)?.missing_energy(energy).is_none())
            }
            Self::TurnNumber { min, max } => Ok(within(state.turn.number, *min, *max)),
            Self::CardInHand { .. } => Err(ConditionError::NotSupported("card_in_hand")),
            Self::HealthBelow { .. } => Err(ConditionError::NotSupported("health_below")),
            Self::And(conditions) => {
                for condition in conditions {
                    if !condition.evaluate(state, controller)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(conditions) => {
                for condition in conditions {
                    if condition.evaluate(state, controller)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(inner) => Ok(!inner.evaluate(state, controller)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::state::{Color, Zone};

    #[test]
    fn character_count_spans_both_lines() {
        let mut state = session();
        put_character(&mut state, ALICE, 1, 1000, Zone::FrontLine, 0);
        put_character(&mut state, ALICE, 2, 1000, Zone::EnergyLine, 0);

        let exactly_two = Condition::CharacterCount {
            player: PlayerRef::Controller,
            min: Some(2),
            max: Some(2),
        };
        assert_eq!(exactly_two.evaluate(&state, ALICE), Ok(true));
        assert_eq!(exactly_two.evaluate(&state, BOB), Ok(false));
    }

    #[test]
    fn energy_available_checks_every_colour() {
        let mut state = session();
        state.players[0].energy = EnergyMap::from([(Color::Red, 2), (Color::Blue, 1)]);

        let enough = Condition::EnergyAvailable {
            player: PlayerRef::Controller,
            energy: EnergyMap::from([(Color::Red, 2)]),
        };
        let short = Condition::EnergyAvailable {
            player: PlayerRef::Controller,
            energy: EnergyMap::from([(Color::Red, 1), (Color::Blue, 2)]),
        };
        assert_eq!(enough.evaluate(&state, ALICE), Ok(true));
        assert_eq!(short.evaluate(&state, ALICE), Ok(false));
        assert_eq!(enough.evaluate(&state, BOB), Ok(false));
    }

    #[test]
    fn placeholder_conditions_never_fire() {
        let state = session();
        let in_hand = Condition::CardInHand {
            player: PlayerRef::Controller,
            count: 0,
        };
        let health = Condition::HealthBelow {
            player: PlayerRef::Opponent,
            threshold: 100,
        };

        assert_eq!(
            in_hand.evaluate(&state, ALICE),
            Err(ConditionError::NotSupported("card_in_hand"))
        );
        assert_eq!(
            health.evaluate(&state, ALICE),
            Err(ConditionError::NotSupported("health_below"))
        );
        // A placeholder inside a combinator still surfaces.
        assert!(Condition::Not(Box::new(in_hand)).evaluate(&state, ALICE).is_err());
    }

    #[test]
    fn combinators_compose() {
        let state = session();
        let first_turn = Condition::TurnNumber {
            min: None,
            max: Some(1),
        };
        let late = Condition::TurnNumber {
            min: Some(3),
            max: None,
        };

        assert_eq!(
            Condition::And(vec![first_turn.clone(), late.clone()]).evaluate(&state, ALICE),
            Ok(false)
        );
        assert_eq!(
            Condition::Or(vec![first_turn, late.clone()]).evaluate(&state, ALICE),
            Ok(true)
        );
        assert_eq!(Condition::Not(Box::new(late)).evaluate(&state, ALICE), Ok(true));
    }
}
