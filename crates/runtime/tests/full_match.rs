mod common;

use battle_core::{
    Action, EndTurnAction, LoggedPayload, Phase, SurrenderAction, WinReason,
};
use battle_runtime::{
    AggressiveActionProvider, Event, FileSessionStore, PassActionProvider, RuntimeError,
    SessionEvent, SessionStore, Topic,
};

use common::{ALICE, BOB, MAX_STEPS};

/// End-to-end match through a session handle.
///
/// 1. Two starter decks are dealt and both players keep
/// 2. Both seats are driven by the greedy policy until the game ends
/// 3. The final state, lifecycle events, registry and store all agree
#[tokio::test]
async fn aggressive_players_finish_a_match() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runtime = common::file_runtime(dir.path());
    let mut lifecycle = runtime.subscribe(Topic::Session);

    // ================================================================
    // Setup
    // ================================================================
    let id = common::started_session(&runtime, 42).await;
    let handle = runtime.session(id).await.expect("session should be live");

    let opening = handle.query_state().await.expect("state");
    assert!(opening.life_areas_ready);
    assert_eq!(opening.turn.active_player, ALICE);
    assert_eq!(opening.turn.phase, Phase::Start);
    for player in &opening.players {
        assert_eq!(player.life_area.len(), 7);
    }

    // ================================================================
    // Play
    // ================================================================
    let final_state = common::play_out(&handle, &AggressiveActionProvider, MAX_STEPS).await;

    let outcome = final_state.outcome.expect("match should finish");
    assert_ne!(outcome.winner, outcome.loser);
    let loser = final_state.player(outcome.loser).expect("loser is seated");
    match outcome.reason {
        WinReason::LifeAreaEmpty => assert!(loser.life_area.is_empty()),
        WinReason::DeckOut => assert!(loser.deck.is_empty()),
        WinReason::Surrender => panic!("nobody surrendered"),
    }

    for (index, entry) in final_state.log().entries().iter().enumerate() {
        assert_eq!(entry.id, index as u64, "log ids are the session nonce");
        assert!(matches!(entry.payload, LoggedPayload::Decoded(_)));
    }

    // ================================================================
    // Lifecycle, registry and store
    // ================================================================
    let mut events = Vec::new();
    while let Ok(Event::Session(event)) = lifecycle.try_recv() {
        events.push(event);
    }
    assert!(matches!(events.first(), Some(SessionEvent::Created { session, .. }) if *session == id));
    assert!(events.contains(&SessionEvent::Started { session: id }));
    assert_eq!(
        events.last(),
        Some(&SessionEvent::Ended {
            session: id,
            winner: outcome.winner,
            loser: outcome.loser,
            reason: outcome.reason,
        })
    );

    assert!(matches!(
        runtime.session(id).await,
        Err(RuntimeError::SessionNotFound(missing)) if missing == id
    ));
    assert!(runtime.sessions().await.is_empty());

    let store = FileSessionStore::new(dir.path()).expect("store");
    let stored = store.load(id).expect("load").expect("final state kept");
    assert_eq!(stored, final_state);

    // The archived worker still answers, but the game is over.
    let late = handle
        .submit(Action::new(outcome.winner, EndTurnAction {}))
        .await
        .expect("worker should answer");
    assert!(!late.success);
    assert_eq!(late.error_code(), Some("ACTION_GAME_OVER"));

    drop(handle);
    runtime.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn surrender_ends_the_match_for_either_seat() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 3).await;
    let handle = runtime.session(id).await.expect("session");
    let mut lifecycle = handle.subscribe(Topic::Session);

    // Bob is not active, surrender is still accepted.
    let response = handle
        .submit(Action::new(BOB, SurrenderAction {}))
        .await
        .expect("worker should answer");

    assert!(response.success);
    assert!(response.persisted);
    let state = handle.query_state().await.expect("state");
    let outcome = state.outcome.expect("surrender ends the game");
    assert_eq!(outcome.winner, ALICE);
    assert_eq!(outcome.reason, WinReason::Surrender);

    let Ok(Event::Session(SessionEvent::Ended { winner, .. })) = lifecycle.recv().await else {
        panic!("expected the end of the session");
    };
    assert_eq!(winner, ALICE);
}

#[tokio::test]
async fn step_asks_the_provider_for_the_active_player() {
    let runtime = common::runtime();
    let id = common::started_session(&runtime, 11).await;

    let response = runtime
        .step(id, &PassActionProvider)
        .await
        .expect("step should run");

    assert!(response.success);
    assert_eq!(response.next_phase, Some(Phase::Move));
}
