mod common;

use battle_core::{CardType, GameEvent, LoggedPayload, Phase, Zone};
use battle_runtime::{ActionEvent, ActionSubmission, Event, Runtime, Topic, blue_deck, red_deck};
use serde_json::{Value, json};

use common::{ALICE, BOB};

async fn advance_to(runtime: &Runtime, id: battle_core::SessionId, phase: Phase) {
    loop {
        let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
        if state.turn.phase == phase {
            return;
        }
        let response = runtime
            .submit_action(id, ActionSubmission::new(ALICE, "END_PHASE", Value::Null))
            .await
            .expect("worker should answer");
        assert!(response.success);
    }
}

#[tokio::test]
async fn unknown_action_type_is_logged_with_its_raw_payload() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 1).await;
    let mut actions = runtime.subscribe(Topic::Action);

    let response = runtime
        .submit_action(id, ActionSubmission::new(ALICE, "CAST_SPELL", json!({ "x": 1 })))
        .await
        .expect("worker should answer");

    assert!(!response.success);
    assert_eq!(response.error_code(), Some("ACTION_UNKNOWN_TYPE"));
    assert!(response.events.is_empty());

    let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
    let entry = state.log().last().expect("rejection is logged");
    assert_eq!(entry.action_type, "CAST_SPELL");
    assert_eq!(entry.payload, LoggedPayload::Malformed(r#"{"x":1}"#.to_owned()));
    assert!(!entry.valid);

    let Ok(Event::Action(ActionEvent::Rejected { error_code, log_id, .. })) =
        actions.recv().await
    else {
        panic!("expected a rejection on the action topic");
    };
    assert_eq!(error_code, "ACTION_UNKNOWN_TYPE");
    assert_eq!(log_id, entry.id);
}

#[tokio::test]
async fn malformed_payload_leaves_the_session_unchanged() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 2).await;
    advance_to(&runtime, id, Phase::Main).await;
    let handle = runtime.session(id).await.expect("session");
    let before = handle.query_state().await.expect("state");

    for payload in [
        json!({ "card_id": "first" }),
        json!({ "position": { "zone": "front_line" } }),
        json!({ "card_id": 1, "position": { "zone": "back_line" } }),
        json!("card 1"),
    ] {
        let response = handle
            .submit_action(ActionSubmission::new(ALICE, "PLAY_CARD", payload))
            .await
            .expect("worker should answer");
        assert_eq!(response.error_code(), Some("ACTION_MALFORMED_PAYLOAD"));
    }

    let after = handle.query_state().await.expect("state");
    assert_eq!(after.players, before.players);
    assert_eq!(after.turn.phase, Phase::Main);
    assert_eq!(after.log().len(), before.log().len() + 4);
    assert_eq!(after.log().rejected().count(), 4);
}

#[tokio::test]
async fn attack_during_main_is_rejected_and_logged() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 4).await;
    advance_to(&runtime, id, Phase::Main).await;

    let response = runtime
        .submit_action(
            id,
            ActionSubmission::new(ALICE, "ATTACK", json!({ "card_id": 1, "target_type": "player" })),
        )
        .await
        .expect("worker should answer");

    assert!(!response.success);
    assert_eq!(response.error_code(), Some("ACTION_WRONG_PHASE"));
    let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
    let entry = state.log().last().expect("logged");
    assert_eq!(entry.action_type, "ATTACK");
    assert_eq!(entry.phase, Phase::Main);
    assert!(matches!(entry.payload, LoggedPayload::Decoded(_)));
}

#[tokio::test]
async fn only_the_active_player_may_act() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 5).await;

    let response = runtime
        .submit_action(id, ActionSubmission::new(BOB, "END_PHASE", json!({})))
        .await
        .expect("worker should answer");

    assert_eq!(response.error_code(), Some("ACTION_NOT_ACTIVE_PLAYER"));
}

#[tokio::test]
async fn actions_before_both_mulligans_are_rejected() {
    let runtime = common::runtime();
    let id = runtime
        .initialize_session_with_seed(6, red_deck(ALICE), blue_deck(BOB))
        .await
        .expect("session should initialize");
    runtime.submit_mulligan(id, ALICE, true).await.expect("Alice redraws");

    let response = runtime
        .submit_action(id, ActionSubmission::new(ALICE, "DRAW_CARD", Value::Null))
        .await
        .expect("worker should answer");

    assert_eq!(response.error_code(), Some("ACTION_SETUP_INCOMPLETE"));
    let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
    assert!(!state.life_areas_ready);
    assert_eq!(state.log().len(), 1);
}

#[tokio::test]
async fn json_play_card_reaches_the_board() {
    let runtime = common::runtime();

    // First seed whose opening hand holds a card playable with 1 AP and no energy.
    let mut found = None;
    for seed in 0..64 {
        let id = common::started_session(&runtime, seed).await;
        let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
        let alice = state.player(ALICE).expect("seated");
        let playable = alice.hand.iter().find(|card| {
            card.definition.ap_cost <= alice.ap && card.definition.energy_cost.is_empty()
                && matches!(card.card_type(), CardType::Character | CardType::Field)
        });
        if let Some(card) = playable {
            found = Some((id, card.id, card.card_type()));
            break;
        }
    }
    let (id, card, card_type) = found.expect("some seed deals a playable opening hand");
    advance_to(&runtime, id, Phase::Main).await;

    let zone = match card_type {
        CardType::Field => "energy_line",
        _ => "front_line",
    };
    let response = runtime
        .submit_action(
            id,
            ActionSubmission::new(
                ALICE,
                "play_card",
                json!({ "card_id": card.0, "position": { "zone": zone } }),
            ),
        )
        .await
        .expect("worker should answer");

    assert!(response.success, "{:?}", response.error);
    let expected = match card_type {
        CardType::Field => Zone::EnergyLine,
        _ => Zone::FrontLine,
    };
    assert!(response.events.iter().any(|event| matches!(
        event,
        GameEvent::CardPlayed { player, card: played, zone, .. }
            if *player == ALICE && *played == card && *zone == Some(expected)
    )));
    let state = runtime.session(id).await.expect("session").query_state().await.expect("state");
    let placed = state
        .player(ALICE)
        .and_then(|alice| alice.board.find(card))
        .expect("card is on the board");
    assert_eq!(placed.position.zone, expected);
}
