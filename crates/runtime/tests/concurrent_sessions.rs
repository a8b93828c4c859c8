mod common;

use std::sync::Arc;

use battle_core::GameState;
use battle_runtime::AggressiveActionProvider;

use common::MAX_STEPS;

async fn play(runtime: Arc<battle_runtime::Runtime>, seed: u64) -> GameState {
    let id = common::started_session(&runtime, seed).await;
    let handle = runtime.session(id).await.expect("session should be live");
    common::play_out(&handle, &AggressiveActionProvider, MAX_STEPS).await
}

/// Independent sessions run side by side without sharing state.
///
/// Sessions built from the same seed and driven by the same policy end in the
/// same position, whatever else the runtime is doing meanwhile.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sessions_progress_independently() {
    let runtime = Arc::new(common::runtime());
    let seeds = [7, 99, 7, 99];

    let tasks: Vec<_> = seeds
        .iter()
        .map(|&seed| tokio::spawn(play(Arc::clone(&runtime), seed)))
        .collect();

    let mut finals = Vec::new();
    for task in tasks {
        finals.push(task.await.expect("session task should not panic"));
    }

    for state in &finals {
        assert!(state.is_over(), "session {} did not finish", state.id);
    }

    let mut ids: Vec<_> = finals.iter().map(|state| state.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), seeds.len(), "every session has its own id");

    for (left, right) in [(0, 2), (1, 3)] {
        assert_eq!(finals[left].players, finals[right].players);
        assert_eq!(finals[left].outcome, finals[right].outcome);
        assert_eq!(finals[left].turn, finals[right].turn);
        assert_eq!(finals[left].log().len(), finals[right].log().len());
    }

    assert!(runtime.sessions().await.is_empty(), "finished sessions are archived");
}

#[tokio::test]
async fn each_runtime_owns_its_registry() {
    let first = common::runtime();
    let second = common::runtime();

    let id = common::started_session(&first, 1).await;

    assert_eq!(first.sessions().await, vec![id]);
    assert!(second.sessions().await.is_empty());
    assert!(second.session(id).await.is_err());
}
