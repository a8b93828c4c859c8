//! Action execution pipeline and session lifecycle.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! submission, accepted or not, goes through [`GameEngine::process`]:
//!
//! 1. session gate (game over, setup incomplete, unknown or inactive player)
//! 2. phase gate from [`ActionKind::required_phase`](crate::action::ActionKind::required_phase)
//! 3. `pre_validate → apply → post_validate` on a staged copy of the state
//! 4. commit on success, discard on failure
//! 5. append to the action log and run the win checker
//!
//! A rejected action leaves the session untouched apart from its log entry.

mod errors;
mod setup;
mod transition;
pub(crate) mod turns;
mod win;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use setup::{DeckList, MulliganError, SetupError, initialize_session};

use crate::action::{Action, ActionError, ActionKind};
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::{ActionLogEntry, GameState, LoggedPayload, Phase, PlayerId};

/// Result of one processed submission.
///
/// `events` is empty when the action was rejected, except for a `GameEnded`
/// raised by the win checker.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub success: bool,
    pub error: Option<ExecuteError>,
    pub events: Vec<GameEvent>,
    /// Phase after the action, when the phase or the turn changed.
    pub next_phase: Option<Phase>,
}

impl ActionOutcome {
    fn accepted(events: Vec<GameEvent>, next_phase: Option<Phase>) -> Self {
        Self {
            success: true,
            error: None,
            events,
            next_phase,
        }
    }

    fn rejected(error: ExecuteError, events: Vec<GameEvent>) -> Self {
        Self {
            success: false,
            error: Some(error),
            events,
            next_phase: None,
        }
    }
}

/// Game engine that validates and applies actions against one session.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Processes one submission.
    ///
    /// The transition runs against a clone of the state so a failure in
    /// `apply` or `post_validate` cannot leave a half-applied action behind.
    pub fn process(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
        timestamp_ms: i64,
    ) -> ActionOutcome {
        let turn_before = (self.state.turn.number, self.state.turn.phase);
        let result = self.execute(&env, action);

        let error = result.as_ref().err().map(ToString::to_string);
        self.append_log(
            action.actor,
            action.kind().to_string(),
            LoggedPayload::Decoded(action.params.clone()),
            turn_before,
            timestamp_ms,
            error,
        );

        match result {
            Ok(mut events) => {
                win::check_win(self.state, &mut events);
                let turn_after = (self.state.turn.number, self.state.turn.phase);
                let next_phase = (turn_after != turn_before).then_some(self.state.turn.phase);
                ActionOutcome::accepted(events, next_phase)
            }
            Err(error) => {
                let mut events = Vec::new();
                win::check_win(self.state, &mut events);
                ActionOutcome::rejected(error, events)
            }
        }
    }

    /// Logs a submission that failed to decode before reaching the pipeline.
    pub fn reject(
        &mut self,
        player: PlayerId,
        action_type: impl Into<String>,
        raw_payload: impl Into<String>,
        error: ActionError,
        timestamp_ms: i64,
    ) -> ActionOutcome {
        let turn = (self.state.turn.number, self.state.turn.phase);
        let error = ExecuteError::Rejected(error);
        self.append_log(
            player,
            action_type.into(),
            LoggedPayload::Malformed(raw_payload.into()),
            turn,
            timestamp_ms,
            Some(error.to_string()),
        );
        ActionOutcome::rejected(error, Vec::new())
    }

    /// Records a keep/redraw decision for `player`.
    pub fn submit_mulligan(
        &mut self,
        env: GameEnv<'_>,
        player: PlayerId,
        redraw: bool,
    ) -> Result<Vec<GameEvent>, MulliganError> {
        setup::submit_mulligan(self.state, &env, player, redraw)
    }

    fn execute(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<Vec<GameEvent>, ExecuteError> {
        self.gate(action)?;

        let mut staged = self.state.clone();
        let mut events = Vec::new();
        transition::execute_transition(
            &action.params,
            action.actor,
            &mut staged,
            env,
            &mut events,
        )?;

        *self.state = staged;
        Ok(events)
    }

    fn gate(&self, action: &Action) -> Result<(), ActionError> {
        let state = &*self.state;
        if state.is_over() {
            return Err(ActionError::GameOver);
        }
        if !state.life_areas_ready {
            return Err(ActionError::SetupIncomplete);
        }
        if state.player(action.actor).is_none() {
            return Err(ActionError::UnknownPlayer(action.actor));
        }

        let kind = action.kind();
        // Either player may concede at any time.
        if kind != ActionKind::Surrender && action.actor != state.turn.active_player {
            return Err(ActionError::NotActivePlayer {
                actor: action.actor,
                active: state.turn.active_player,
            });
        }
        if let Some(required) = kind.required_phase()
            && required != state.turn.phase
        {
            return Err(ActionError::WrongPhase {
                kind,
                required,
                current: state.turn.phase,
            });
        }
        Ok(())
    }

    fn append_log(
        &mut self,
        player: PlayerId,
        action_type: String,
        payload: LoggedPayload,
        (turn, phase): (u32, Phase),
        timestamp_ms: i64,
        error: Option<String>,
    ) {
        let id = self.state.turn.nonce;
        self.state.log_mut().append(ActionLogEntry {
            id,
            player,
            action_type,
            payload,
            turn,
            phase,
            timestamp_ms,
            valid: error.is_none(),
            error,
        });
        self.state.turn.nonce += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::test_support::*;
    use crate::action::effect::{Effect, EffectKind, EffectTarget, PlayerRef};
    use crate::action::{
        AttackAction, DrawCardAction, EndPhaseAction, EndTurnAction, PlayCardAction,
        SurrenderAction,
    };
    use crate::config::GameConfig;
    use crate::error::GameError;
    use crate::state::{Card, CardDefinition, CardInstanceId, CardType, Color, WinReason, Zone};

    fn process(state: &mut GameState, action: Action) -> ActionOutcome {
        let config = GameConfig::default();
        GameEngine::new(state).process(GameEnv::rules_only(&config), &action, 1_000)
    }

    #[test]
    fn attack_during_main_is_rejected_and_logged() {
        let mut state = session();
        state.turn.phase = Phase::Main;
        let attacker = put_character(&mut state, ALICE, 1, 5000, Zone::FrontLine, 0);
        let before = state.clone();

        let outcome = process(&mut state, Action::new(ALICE, AttackAction::player(attacker)));

        assert!(!outcome.success);
        let error = outcome.error.unwrap();
        assert_eq!(error.error_code(), "ACTION_WRONG_PHASE");
        assert!(outcome.events.is_empty());
        assert_eq!(state.players, before.players);
        assert_eq!(state.turn.phase, Phase::Main);

        let entry = state.log().last().unwrap();
        assert!(!entry.valid);
        assert_eq!(entry.action_type, "ATTACK");
        assert_eq!(entry.phase, Phase::Main);
        assert_eq!(entry.timestamp_ms, 1_000);
    }

    #[test]
    fn inactive_player_is_rejected() {
        let mut state = session();
        let outcome = process(&mut state, Action::new(BOB, DrawCardAction {}));

        assert_eq!(
            outcome.error.map(|e| e.action_error().clone()),
            Some(ActionError::NotActivePlayer {
                actor: BOB,
                active: ALICE
            })
        );
    }

    #[test]
    fn actions_before_setup_are_rejected_but_logged() {
        let mut state = session();
        state.life_areas_ready = false;

        let outcome = process(&mut state, Action::new(ALICE, DrawCardAction {}));

        assert_eq!(
            outcome.error.map(|e| e.action_error().clone()),
            Some(ActionError::SetupIncomplete)
        );
        assert_eq!(state.log().len(), 1);
        assert_eq!(state.turn.nonce, 1);
    }

    #[test]
    fn actions_after_game_over_are_rejected() {
        let mut state = session();
        process(&mut state, Action::new(ALICE, SurrenderAction {}));

        let outcome = process(&mut state, Action::new(BOB, EndPhaseAction {}));

        assert_eq!(
            outcome.error.map(|e| e.action_error().clone()),
            Some(ActionError::GameOver)
        );
        assert_eq!(state.log().rejected().count(), 1);
    }

    #[test]
    fn either_player_may_surrender() {
        let mut state = session();
        let outcome = process(&mut state, Action::new(BOB, SurrenderAction {}));

        assert!(outcome.success);
        let outcome_state = state.outcome.unwrap();
        assert_eq!(outcome_state.winner, ALICE);
        assert_eq!(outcome_state.reason, WinReason::Surrender);
        let ended = outcome
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn failed_apply_rolls_back_staged_changes() {
        let mut state = session();
        state.turn.phase = Phase::Main;
        let definition = CardDefinition::new("E-001", "Mend", CardType::Event, Color::Green)
            .with_ap_cost(1)
            .with_on_play(Effect::new(
                EffectKind::Heal { amount: 2 },
                EffectTarget::Player(PlayerRef::Controller),
            ));
        {
            let alice = state.player_mut(ALICE).unwrap();
            alice.ap = 1;
            alice.hand.push(Card::new(CardInstanceId(60), definition));
        }
        let before = state.clone();

        let play = PlayCardAction::new(CardInstanceId(60));
        let outcome = process(&mut state, Action::new(ALICE, play));

        let error = outcome.error.unwrap();
        assert_eq!(error.phase(), Some(TransitionPhase::Apply));
        assert_eq!(error.error_code(), "EFFECT_NOT_SUPPORTED");
        assert!(outcome.events.is_empty());
        assert_eq!(state.players, before.players);
    }

    #[test]
    fn phase_changes_are_reported() {
        let mut state = session();

        let outcome = process(&mut state, Action::new(ALICE, EndPhaseAction {}));
        assert_eq!(outcome.next_phase, Some(Phase::Move));

        let outcome = process(&mut state, Action::new(ALICE, EndTurnAction {}));
        assert_eq!(outcome.next_phase, Some(Phase::Start));
        assert_eq!(state.turn.active_player, BOB);

        let outcome = process(&mut state, Action::new(BOB, DrawCardAction {}));
        assert!(outcome.success);
        assert_eq!(outcome.next_phase, None);
    }

    #[test]
    fn log_ids_follow_the_nonce() {
        let mut state = session();
        process(&mut state, Action::new(ALICE, DrawCardAction {}));
        process(&mut state, Action::new(BOB, DrawCardAction {}));
        process(&mut state, Action::new(ALICE, EndPhaseAction {}));

        let ids: Vec<u64> = state.log().entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let valid: Vec<bool> = state.log().entries().iter().map(|e| e.valid).collect();
        assert_eq!(valid, vec![true, false, true]);
    }

    #[test]
    fn malformed_payloads_are_logged_raw() {
        let mut state = session();
        let outcome = GameEngine::new(&mut state).reject(
            ALICE,
            "CAST_SPELL",
            "{\"mana\":3}",
            ActionError::UnknownActionType("CAST_SPELL".into()),
            5,
        );

        assert!(!outcome.success);
        let entry = state.log().last().unwrap();
        assert_eq!(entry.payload, LoggedPayload::Malformed("{\"mana\":3}".into()));
        assert_eq!(entry.action_type, "CAST_SPELL");
    }

    #[test]
    fn lethal_attack_ends_the_game() {
        let mut state = session();
        state.turn.phase = Phase::Attack;
        state.player_mut(BOB).unwrap().life_area.truncate(1);
        let attacker = put_character(&mut state, ALICE, 1, 5000, Zone::FrontLine, 0);

        let outcome = process(&mut state, Action::new(ALICE, AttackAction::player(attacker)));

        assert!(outcome.success);
        assert!(matches!(
            outcome.events.last(),
            Some(GameEvent::GameEnded {
                reason: WinReason::LifeAreaEmpty,
                ..
            })
        ));
        assert_eq!(state.outcome.map(|o| o.winner), Some(ALICE));
    }

    #[test]
    fn drawing_the_last_card_at_turn_start_decks_out() {
        let mut state = session();
        state.player_mut(BOB).unwrap().deck.truncate(1);

        let outcome = process(&mut state, Action::new(ALICE, EndTurnAction {}));

        assert!(outcome.success);
        let bob = state.player(BOB).unwrap();
        assert!(bob.deck.is_empty());
        assert_eq!(bob.hand.len(), 1);
        assert_eq!(
            state.outcome.map(|o| (o.winner, o.loser, o.reason)),
            Some((ALICE, BOB, WinReason::DeckOut))
        );
        assert!(matches!(
            outcome.events.last(),
            Some(GameEvent::GameEnded {
                reason: WinReason::DeckOut,
                ..
            })
        ));
    }

    #[test]
    fn draw_card_is_not_limited_per_turn() {
        let mut state = session();

        for _ in 0..4 {
            let outcome = process(&mut state, Action::new(ALICE, DrawCardAction {}));
            assert!(outcome.success);
        }

        assert_eq!(state.turn.phase, Phase::Start);
        assert_eq!(state.player(ALICE).unwrap().hand.len(), 4);
    }
}
