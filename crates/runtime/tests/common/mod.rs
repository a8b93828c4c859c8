//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::path::Path;

use battle_core::{Action, EndPhaseAction, GameState, PlayerId, SessionId};
use battle_runtime::{
    ActionProvider, Runtime, RuntimeConfig, SessionHandle, blue_deck, red_deck, starter_catalog,
};

pub const ALICE: PlayerId = PlayerId(1);
pub const BOB: PlayerId = PlayerId(2);

/// Upper bound on submissions for one driven match.
pub const MAX_STEPS: usize = 5_000;

/// Runtime over the starter catalog with an in-memory store.
pub fn runtime() -> Runtime {
    Runtime::builder()
        .catalog(starter_catalog())
        .build()
        .expect("runtime should build")
}

/// Runtime over the starter catalog with a file store in `dir`.
pub fn file_runtime(dir: &Path) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            data_dir: Some(dir.to_path_buf()),
            ..RuntimeConfig::default()
        })
        .catalog(starter_catalog())
        .build()
        .expect("runtime should build")
}

/// Red (Alice, first) vs blue (Bob) with both opening hands kept.
pub async fn started_session(runtime: &Runtime, seed: u64) -> SessionId {
    let id = runtime
        .initialize_session_with_seed(seed, red_deck(ALICE), blue_deck(BOB))
        .await
        .expect("session should initialize");
    runtime
        .submit_mulligan(id, ALICE, false)
        .await
        .expect("Alice keeps");
    runtime
        .submit_mulligan(id, BOB, false)
        .await
        .expect("Bob keeps");
    id
}

/// Drives a session with `provider` until the game ends or `max_steps`
/// submissions were made. A rejected proposal ends the phase instead.
pub async fn play_out(
    handle: &SessionHandle,
    provider: &dyn ActionProvider,
    max_steps: usize,
) -> GameState {
    for _ in 0..max_steps {
        let state = handle.query_state().await.expect("worker should answer");
        if state.is_over() {
            return state;
        }

        let player = state.turn.active_player;
        let action = provider
            .provide_action(player, &state)
            .await
            .expect("provider should propose an action");
        let response = handle.submit(action).await.expect("worker should answer");
        if !response.success {
            let fallback = handle
                .submit(Action::new(player, EndPhaseAction {}))
                .await
                .expect("worker should answer");
            assert!(fallback.success, "ending the phase is always legal");
        }
    }

    handle.query_state().await.expect("worker should answer")
}
