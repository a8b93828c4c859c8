//! Session worker that owns one authoritative [`battle_core::GameState`].
//!
//! Receives commands from [`crate::api::SessionHandle`], runs them through
//! [`battle_core::GameEngine`], saves the result, and publishes events to the
//! EventBus. Commands for one session are handled strictly in order.
//!
//! At most one save is in flight per session. A save that outlives the store
//! timeout keeps running on the blocking pool; the next save waits for it
//! instead of racing it, and a state that could not be handed over in time is
//! saved as soon as the stalled write finishes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use battle_core::{
    Action, ActionOutcome, ErrorSeverity, GameEngine, GameError, GameEvent, GameState, PlayerId,
};

use crate::api::{
    ActionResponse, ActionSubmission, MulliganResponse, Result, RuntimeError, SessionRegistry,
};
use crate::events::{ActionEvent, Event, EventBus, SessionEvent, SessionGameEvent};
use crate::oracle::OracleManager;
use crate::repository::{self, SessionStore};

type SaveTask = JoinHandle<repository::Result<()>>;

/// Commands that can be sent to a session worker
pub(crate) enum SessionCommand {
    /// Decode and process a wire submission.
    Submit {
        submission: ActionSubmission,
        reply: oneshot::Sender<ActionResponse>,
    },
    /// Process an already typed action.
    SubmitTyped {
        action: Action,
        reply: oneshot::Sender<ActionResponse>,
    },
    Mulligan {
        player: PlayerId,
        redraw: bool,
        reply: oneshot::Sender<Result<MulliganResponse>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Save the current state again.
    Persist { reply: oneshot::Sender<Result<()>> },
}

/// Background task that processes one session's commands.
pub(crate) struct SessionWorker {
    state: GameState,
    oracles: OracleManager,
    store: Arc<dyn SessionStore>,
    store_timeout: Duration,
    command_rx: mpsc::Receiver<SessionCommand>,
    event_bus: EventBus,
    registry: SessionRegistry,
    /// Save still running after its caller stopped waiting.
    pending_save: Option<SaveTask>,
    /// The current state has not been handed to the store yet.
    save_deferred: bool,
}

impl SessionWorker {
    pub(crate) fn new(
        state: GameState,
        oracles: OracleManager,
        store: Arc<dyn SessionStore>,
        store_timeout: Duration,
        command_rx: mpsc::Receiver<SessionCommand>,
        event_bus: EventBus,
        registry: SessionRegistry,
    ) -> Self {
        debug!(
            target: "runtime::worker",
            session = %state.id,
            turn = state.turn.number,
            phase = %state.turn.phase,
            "session worker initialized"
        );

        Self {
            state,
            oracles,
            store,
            store_timeout,
            command_rx,
            event_bus,
            registry,
            pending_save: None,
            save_deferred: false,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    ///
    /// Before stopping, waits for a stalled save and flushes a deferred one.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                joined = stalled_save(&mut self.pending_save), if self.pending_save.is_some() => {
                    self.pending_save = None;
                    self.settle_stalled_save(joined).await;
                }
                else => break,
            }
        }

        if let Some(pending) = self.pending_save.take() {
            let joined = pending.await;
            self.settle_stalled_save(joined).await;
        }

        debug!(target: "runtime::worker", session = %self.state.id, "session worker stopped");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Submit { submission, reply } => {
                let response = self.handle_submission(submission).await;
                if reply.send(response).is_err() {
                    debug!(target: "runtime::worker", "Submit reply channel closed (caller dropped)");
                }
            }
            SessionCommand::SubmitTyped { action, reply } => {
                let response = self.handle_action(action).await;
                if reply.send(response).is_err() {
                    debug!(target: "runtime::worker", "SubmitTyped reply channel closed (caller dropped)");
                }
            }
            SessionCommand::Mulligan {
                player,
                redraw,
                reply,
            } => {
                let result = self.handle_mulligan(player, redraw).await;
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Mulligan reply channel closed (caller dropped)");
                }
            }
            SessionCommand::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
            SessionCommand::Persist { reply } => {
                let result = self.persist().await;
                if let Err(error) = &result {
                    self.report_persistence_failure(error);
                }
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Persist reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn handle_submission(&mut self, submission: ActionSubmission) -> ActionResponse {
        match submission.decode() {
            Ok(action) => self.handle_action(action).await,
            Err(error) => {
                let raw_payload = submission.payload.to_string();
                let outcome = GameEngine::new(&mut self.state).reject(
                    submission.player_id,
                    submission.action_type.clone(),
                    raw_payload,
                    error,
                    Utc::now().timestamp_millis(),
                );
                self.finish_action(submission.player_id, &submission.action_type, outcome)
                    .await
            }
        }
    }

    async fn handle_action(&mut self, action: Action) -> ActionResponse {
        let env = self.oracles.as_game_env();
        let outcome = GameEngine::new(&mut self.state).process(
            env,
            &action,
            Utc::now().timestamp_millis(),
        );
        let action_type = action.kind().to_string();
        self.finish_action(action.actor, &action_type, outcome).await
    }

    /// Logs, publishes and persists the result of a submission.
    ///
    /// Rejections are persisted too: they still append to the action log.
    async fn finish_action(
        &mut self,
        player: PlayerId,
        action_type: &str,
        outcome: ActionOutcome,
    ) -> ActionResponse {
        let session = self.state.id;
        let log_id = self
            .state
            .log()
            .last()
            .map(|entry| entry.id)
            .unwrap_or_default();

        let action_event = match &outcome.error {
            None => {
                debug!(
                    target: "runtime::worker",
                    %session,
                    %player,
                    action_type,
                    log_id,
                    events = outcome.events.len(),
                    "action accepted"
                );
                ActionEvent::Accepted {
                    session,
                    player,
                    action_type: action_type.to_owned(),
                    log_id,
                    next_phase: outcome.next_phase,
                }
            }
            Some(error) => {
                if error.severity() == ErrorSeverity::Internal {
                    error!(
                        target: "runtime::worker",
                        %session,
                        %player,
                        action_type,
                        phase = error.phase().map(|phase| phase.as_str()),
                        error = %error,
                        "action execution failed"
                    );
                } else {
                    debug!(
                        target: "runtime::worker",
                        %session,
                        %player,
                        action_type,
                        code = error.error_code(),
                        error = %error,
                        "action rejected"
                    );
                }
                ActionEvent::Rejected {
                    session,
                    player,
                    action_type: action_type.to_owned(),
                    log_id,
                    error_code: error.error_code().to_owned(),
                    error: error.to_string(),
                }
            }
        };

        self.publish_game_events(&outcome.events);
        self.event_bus.publish(Event::Action(action_event));

        let persisted = self.persist_or_report().await;
        self.archive_if_finished(&outcome.events).await;

        ActionResponse::from_outcome(outcome, persisted)
    }

    async fn handle_mulligan(&mut self, player: PlayerId, redraw: bool) -> Result<MulliganResponse> {
        let session = self.state.id;
        let env = self.oracles.as_game_env();
        let events = GameEngine::new(&mut self.state)
            .submit_mulligan(env, player, redraw)
            .map_err(|error| {
                debug!(
                    target: "runtime::worker",
                    %session,
                    %player,
                    code = error.error_code(),
                    "mulligan rejected"
                );
                RuntimeError::Mulligan(error)
            })?;

        self.publish_game_events(&events);
        if events.contains(&GameEvent::LifeAreasDealt) {
            info!(target: "runtime::worker", %session, "session started");
            self.event_bus
                .publish(Event::Session(SessionEvent::Started { session }));
        }

        let persisted = self.persist_or_report().await;
        Ok(MulliganResponse { events, persisted })
    }

    fn publish_game_events(&self, events: &[GameEvent]) {
        let session = self.state.id;
        for event in events {
            if let GameEvent::TriggerSkipped { source, reason } = event {
                warn!(target: "runtime::worker", %session, ?source, %reason, "trigger skipped");
            }
            self.event_bus.publish(Event::Game(SessionGameEvent {
                session,
                event: event.clone(),
            }));
        }
    }

    /// Publishes the end of the game and drops the session from the registry.
    ///
    /// The worker keeps serving handles that are still alive; every further
    /// action is rejected by the engine with `GameOver`.
    async fn archive_if_finished(&self, events: &[GameEvent]) {
        let Some((winner, loser, reason)) = events.iter().find_map(|event| match event {
            GameEvent::GameEnded {
                winner,
                loser,
                reason,
            } => Some((*winner, *loser, *reason)),
            _ => None,
        }) else {
            return;
        };

        let session = self.state.id;
        info!(target: "runtime::worker", %session, %winner, %reason, "session ended");
        self.event_bus.publish(Event::Session(SessionEvent::Ended {
            session,
            winner,
            loser,
            reason,
        }));
        self.registry.remove(session).await;
    }

    /// Saves the state on the blocking pool, bounded by the store timeout.
    ///
    /// The timeout covers waiting for a stalled earlier save as well. When it
    /// expires before this state reached the store, the save is deferred until
    /// the stalled one finishes; when it expires during this save, the write
    /// is left running and tracked.
    async fn persist(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.store_timeout;

        if let Some(mut pending) = self.pending_save.take() {
            match tokio::time::timeout_at(deadline, &mut pending).await {
                Ok(joined) => {
                    if let Err(error) = flatten(joined) {
                        warn!(
                            target: "runtime::worker",
                            session = %self.state.id,
                            error = %error,
                            "stalled save failed"
                        );
                    }
                }
                Err(_) => {
                    self.pending_save = Some(pending);
                    self.save_deferred = true;
                    return Err(RuntimeError::PersistenceTimeout(self.store_timeout));
                }
            }
        }

        let store = Arc::clone(&self.store);
        let snapshot = self.state.clone();
        self.save_deferred = false;
        let mut save = tokio::task::spawn_blocking(move || store.save(&snapshot));

        match tokio::time::timeout_at(deadline, &mut save).await {
            Ok(joined) => flatten(joined),
            Err(_) => {
                self.pending_save = Some(save);
                Err(RuntimeError::PersistenceTimeout(self.store_timeout))
            }
        }
    }

    /// Records the late result of a stalled save and flushes a deferred state.
    async fn settle_stalled_save(
        &mut self,
        joined: std::result::Result<repository::Result<()>, JoinError>,
    ) {
        let session = self.state.id;
        match flatten(joined) {
            Ok(()) => debug!(target: "runtime::worker", %session, "stalled save completed"),
            Err(error) => {
                warn!(target: "runtime::worker", %session, error = %error, "stalled save failed")
            }
        }

        if self.save_deferred {
            debug!(
                target: "runtime::worker",
                %session,
                nonce = self.state.turn.nonce,
                "saving deferred state"
            );
            self.persist_or_report().await;
        }
    }

    async fn persist_or_report(&mut self) -> bool {
        match self.persist().await {
            Ok(()) => true,
            Err(error) => {
                self.report_persistence_failure(&error);
                false
            }
        }
    }

    fn report_persistence_failure(&self, error: &RuntimeError) {
        let session = self.state.id;
        error!(target: "runtime::worker", %session, error = %error, "failed to persist session");
        self.event_bus
            .publish(Event::Session(SessionEvent::PersistenceFailed {
                session,
                error: error.to_string(),
            }));
    }
}

/// Resolves when the tracked save finishes; never resolves without one.
async fn stalled_save(
    pending: &mut Option<SaveTask>,
) -> std::result::Result<repository::Result<()>, JoinError> {
    match pending {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

fn flatten(joined: std::result::Result<repository::Result<()>, JoinError>) -> Result<()> {
    match joined {
        Ok(result) => result.map_err(RuntimeError::from),
        Err(join_error) => Err(RuntimeError::WorkerJoin(join_error)),
    }
}
