//! Match simulator.
//!
//! Reference embedding of the runtime: builds a [`Runtime`] over the starter
//! catalog, seats a greedy policy against a random one and plays a full match,
//! logging lifecycle events as they happen.
//!
//! # Environment
//!
//! - `BATTLE_SIM_SEED`: session seed (random when unset)
//! - `BATTLE_DATA_DIR`: persist the session to disk instead of memory
//! - `RUST_LOG`: tracing filter, `info` by default
//!
//! ```bash
//! BATTLE_SIM_SEED=42 RUST_LOG=runtime=debug cargo run -p battle-sim
//! ```

mod policy;

use anyhow::{Context, Result, bail};
use battle_core::{Action, EndPhaseAction, PlayerId};
use battle_runtime::{
    ActionProvider, AggressiveActionProvider, Event, Runtime, RuntimeConfig, Topic, blue_deck,
    red_deck, starter_catalog,
};

use policy::RandomActionProvider;

const RED: PlayerId = PlayerId(1);
const BLUE: PlayerId = PlayerId(2);

/// Hard stop for matches where neither policy makes progress.
const MAX_TURNS: u32 = 200;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let seed = match std::env::var("BATTLE_SIM_SEED") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("BATTLE_SIM_SEED is not a number: {raw}"))?,
        Err(_) => rand::random(),
    };

    tracing::info!(seed, data_dir = ?config.data_dir, "starting simulation");

    let runtime = Runtime::builder()
        .config(config)
        .catalog(starter_catalog())
        .build()
        .context("failed to build runtime")?;

    let mut lifecycle = runtime.subscribe(Topic::Session);
    let watcher = tokio::spawn(async move {
        while let Ok(event) = lifecycle.recv().await {
            if let Event::Session(event) = event {
                tracing::info!(session = %event.session(), ?event, "lifecycle");
            }
        }
    });

    let session = runtime
        .initialize_session_with_seed(seed, red_deck(RED), blue_deck(BLUE))
        .await
        .context("failed to initialize session")?;
    runtime.submit_mulligan(session, RED, false).await?;
    runtime.submit_mulligan(session, BLUE, true).await?;

    let red = AggressiveActionProvider;
    let blue = RandomActionProvider::new(seed);
    let handle = runtime.session(session).await?;

    let final_state = loop {
        let state = handle.query_state().await?;
        if state.is_over() {
            break state;
        }
        if state.turn.number > MAX_TURNS {
            bail!("no winner after {MAX_TURNS} turns");
        }

        let player = state.turn.active_player;
        let provider: &dyn ActionProvider = if player == RED { &red } else { &blue };
        let action = provider.provide_action(player, &state).await?;
        let response = handle.submit(action).await?;
        if !response.success {
            tracing::debug!(
                %player,
                code = response.error_code().unwrap_or("UNKNOWN"),
                "policy proposed an illegal action, ending phase"
            );
            handle.submit(Action::new(player, EndPhaseAction {})).await?;
        }
    };

    let outcome = final_state
        .outcome
        .context("finished session has no outcome")?;
    tracing::info!(
        winner = %outcome.winner,
        loser = %outcome.loser,
        reason = ?outcome.reason,
        turns = final_state.turn.number,
        actions = final_state.log().len(),
        rejected = final_state.log().rejected().count(),
        "match finished"
    );

    drop(handle);
    runtime.shutdown().await?;
    watcher.abort();

    Ok(())
}
