//! Wire-level action submissions and their replies.
//!
//! Clients submit `{player_id, action_type, payload}` with a JSON payload.
//! [`ActionSubmission::decode`] turns that into a typed [`Action`] once, at
//! the boundary; everything past it works with [`battle_core::ActionParams`].
use std::str::FromStr;

use battle_core::{
    Action, ActionError, ActionKind, ActionOutcome, AttackAction, CardInstanceId,
    DrawCardAction, EndPhaseAction, EndTurnAction, ExecuteError, ExtraDrawAction, GameError,
    GameEvent, MoveCharacterAction, Phase, PlayCardAction, PlayerId, SurrenderAction, Zone,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw submission as received from a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSubmission {
    pub player_id: PlayerId,
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Deserialize)]
struct PositionPayload {
    zone: Zone,
    #[serde(default)]
    slot: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct PlayCardPayload {
    card_id: u32,
    #[serde(default)]
    position: Option<PositionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TargetType {
    Player,
    Character,
}

#[derive(Debug, Deserialize)]
struct AttackPayload {
    card_id: u32,
    target_type: TargetType,
    #[serde(default)]
    target_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MoveCharacterPayload {
    card_id: u32,
    position: PositionPayload,
}

/// Kinds whose payload carries nothing; any object is accepted.
#[derive(Debug, Deserialize)]
struct EmptyPayload {}

fn parse<T: DeserializeOwned>(payload: &Value) -> Result<T, ActionError> {
    let payload = match payload {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(payload).map_err(|e| ActionError::MalformedPayload(e.to_string()))
}

impl ActionSubmission {
    pub fn new(player_id: PlayerId, action_type: impl Into<String>, payload: Value) -> Self {
        Self {
            player_id,
            action_type: action_type.into(),
            payload,
        }
    }

    /// Decode into a typed action.
    ///
    /// Fails with [`ActionError::UnknownActionType`] for an unrecognized
    /// `action_type` and [`ActionError::MalformedPayload`] when the payload
    /// does not match the kind's shape.
    pub fn decode(&self) -> Result<Action, ActionError> {
        let kind = ActionKind::from_str(&self.action_type)
            .map_err(|_| ActionError::UnknownActionType(self.action_type.clone()))?;
        let actor = self.player_id;

        let action = match kind {
            ActionKind::DrawCard => {
                parse::<EmptyPayload>(&self.payload)?;
                Action::new(actor, DrawCardAction {})
            }
            ActionKind::ExtraDraw => {
                parse::<EmptyPayload>(&self.payload)?;
                Action::new(actor, ExtraDrawAction {})
            }
            ActionKind::EndPhase => {
                parse::<EmptyPayload>(&self.payload)?;
                Action::new(actor, EndPhaseAction {})
            }
            ActionKind::EndTurn => {
                parse::<EmptyPayload>(&self.payload)?;
                Action::new(actor, EndTurnAction {})
            }
            ActionKind::Surrender => {
                parse::<EmptyPayload>(&self.payload)?;
                Action::new(actor, SurrenderAction {})
            }
            ActionKind::PlayCard => {
                let payload: PlayCardPayload = parse(&self.payload)?;
                let mut play = PlayCardAction::new(CardInstanceId(payload.card_id));
                if let Some(position) = payload.position {
                    play = play.at(position.zone, position.slot);
                }
                Action::new(actor, play)
            }
            ActionKind::Attack => {
                let payload: AttackPayload = parse(&self.payload)?;
                let attacker = CardInstanceId(payload.card_id);
                let attack = match payload.target_type {
                    TargetType::Player => AttackAction::player(attacker),
                    TargetType::Character => {
                        let defender = payload.target_id.ok_or_else(|| {
                            ActionError::MalformedPayload(
                                "target_id is required for a character target".into(),
                            )
                        })?;
                        AttackAction::character(attacker, CardInstanceId(defender))
                    }
                };
                Action::new(actor, attack)
            }
            ActionKind::MoveCharacter => {
                let payload: MoveCharacterPayload = parse(&self.payload)?;
                let mut action = MoveCharacterAction::new(
                    CardInstanceId(payload.card_id),
                    payload.position.zone,
                );
                action.slot = payload.position.slot;
                Action::new(actor, action)
            }
        };
        Ok(action)
    }
}

/// Reply to a submission.
#[derive(Debug)]
pub struct ActionResponse {
    pub success: bool,
    pub error: Option<ExecuteError>,
    pub events: Vec<GameEvent>,
    pub next_phase: Option<Phase>,
    /// Whether the resulting state reached the session store.
    pub persisted: bool,
}

impl ActionResponse {
    pub(crate) fn from_outcome(outcome: ActionOutcome, persisted: bool) -> Self {
        Self {
            success: outcome.success,
            error: outcome.error,
            events: outcome.events,
            next_phase: outcome.next_phase,
            persisted,
        }
    }

    /// Stable code of the rejection, e.g. `ACTION_WRONG_PHASE`.
    pub fn error_code(&self) -> Option<&'static str> {
        self.error.as_ref().map(GameError::error_code)
    }
}

/// Reply to an accepted mulligan decision.
#[derive(Debug)]
pub struct MulliganResponse {
    pub events: Vec<GameEvent>,
    /// Whether the resulting state reached the session store.
    pub persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActionParams, AttackTarget};
    use serde_json::json;

    fn submission(action_type: &str, payload: Value) -> ActionSubmission {
        ActionSubmission::new(PlayerId(1), action_type, payload)
    }

    #[test]
    fn decodes_play_card_with_position() {
        let action = submission(
            "PLAY_CARD",
            json!({ "card_id": 12, "position": { "zone": "energy_line", "slot": 2 } }),
        )
        .decode()
        .unwrap();

        assert_eq!(
            action.params,
            ActionParams::PlayCard(
                PlayCardAction::new(CardInstanceId(12)).at(Zone::EnergyLine, Some(2))
            )
        );
    }

    #[test]
    fn decodes_character_attack() {
        let action = submission(
            "ATTACK",
            json!({ "card_id": 3, "target_type": "character", "target_id": 9 }),
        )
        .decode()
        .unwrap();

        let ActionParams::Attack(attack) = action.params else {
            panic!("expected attack");
        };
        assert_eq!(attack.target, AttackTarget::Character(CardInstanceId(9)));
    }

    #[test]
    fn null_payload_is_accepted_for_payloadless_kinds() {
        let action = submission("end_turn", Value::Null).decode().unwrap();
        assert_eq!(action.kind(), ActionKind::EndTurn);
    }

    #[test]
    fn character_attack_without_target_is_malformed() {
        let err = submission("ATTACK", json!({ "card_id": 3, "target_type": "character" }))
            .decode()
            .unwrap_err();
        assert!(matches!(err, ActionError::MalformedPayload(_)));
    }

    #[test]
    fn non_object_payload_is_malformed() {
        let err = submission("DRAW_CARD", json!("now")).decode().unwrap_err();
        assert!(matches!(err, ActionError::MalformedPayload(_)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = submission("CAST_SPELL", json!({})).decode().unwrap_err();
        assert_eq!(err, ActionError::UnknownActionType("CAST_SPELL".into()));
    }
}
