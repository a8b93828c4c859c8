//! High-level runtime orchestrator.
//!
//! The runtime owns the session workers, wires up command/event channels, and
//! exposes a builder-based API for clients to create, drive and resume
//! sessions.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use battle_core::{Action, DeckList, GameConfig, GameState, PlayerId, SessionId, initialize_session};

use crate::api::{
    ActionProvider, ActionResponse, ActionSubmission, MulliganResponse, Result, RuntimeError,
    SessionHandle, SessionRegistry,
};
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::oracle::{CardCatalog, OracleManager};
use crate::repository::{FileSessionStore, InMemorySessionStore, SessionStore};
use crate::workers::{SessionCommand, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Upper bound on one session store call.
    pub store_timeout: Duration,
    /// Directory of the file-backed store; `None` keeps sessions in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            store_timeout: Duration::from_millis(2_000),
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `BATTLE_*` environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `BATTLE_EVENT_BUFFER` | `event_buffer_size` |
    /// | `BATTLE_COMMAND_BUFFER` | `command_buffer_size` |
    /// | `BATTLE_STORE_TIMEOUT_MS` | `store_timeout` |
    /// | `BATTLE_DATA_DIR` | `data_dir` |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            game_config: defaults.game_config,
            event_buffer_size: read_env("BATTLE_EVENT_BUFFER").unwrap_or(defaults.event_buffer_size),
            command_buffer_size: read_env("BATTLE_COMMAND_BUFFER")
                .unwrap_or(defaults.command_buffer_size),
            store_timeout: read_env("BATTLE_STORE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.store_timeout),
            data_dir: read_env("BATTLE_DATA_DIR").or(defaults.data_dir),
        }
    }
}

/// Reads and parses an environment variable; unparsable values are ignored.
fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "runtime::config", key, value = %raw, "ignoring unparsable value");
            None
        }
    }
}

/// Main runtime that hosts game sessions
///
/// Design: Runtime owns one worker per session and a registry of their
/// handles. [`SessionHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    config: RuntimeConfig,
    oracles: OracleManager,
    store: Arc<dyn SessionStore>,
    event_bus: EventBus,
    registry: SessionRegistry,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Create a session with random id and seed.
    pub async fn initialize_session(&self, first: DeckList, second: DeckList) -> Result<SessionId> {
        self.initialize_session_with_seed(rand::random(), first, second)
            .await
    }

    /// Create a session whose shuffles derive from `seed`.
    ///
    /// `first` takes the first turn once both mulligans are in.
    pub async fn initialize_session_with_seed(
        &self,
        seed: u64,
        first: DeckList,
        second: DeckList,
    ) -> Result<SessionId> {
        let id = self.fresh_session_id().await;
        let players = [first.player, second.player];
        let state = initialize_session(id, seed, first, second, &self.oracles.as_game_env())?;

        let handle = self.spawn_worker(state).await;
        self.registry.insert(handle.clone()).await;

        info!(target: "runtime", session = %id, ?players, "session created");
        self.event_bus
            .publish(Event::Session(SessionEvent::Created { session: id, players }));

        // The worker reports a failed save itself; the session is live either way.
        if handle.persist().await.is_err() {
            warn!(target: "runtime", session = %id, "initial state not persisted");
        }

        Ok(id)
    }

    async fn fresh_session_id(&self) -> SessionId {
        loop {
            let id = SessionId(rand::random());
            if !self.store.exists(id) && !self.registry.contains(id).await {
                return id;
            }
        }
    }

    async fn spawn_worker(&self, state: GameState) -> SessionHandle {
        let id = state.id;
        let (command_tx, command_rx) =
            mpsc::channel::<SessionCommand>(self.config.command_buffer_size.max(1));

        let worker = SessionWorker::new(
            state,
            self.oracles.clone(),
            Arc::clone(&self.store),
            self.config.store_timeout,
            command_rx,
            self.event_bus.clone(),
            self.registry.clone(),
        );

        let join = tokio::spawn(async move {
            worker.run().await;
        });
        self.workers.lock().await.push(join);

        SessionHandle::new(id, command_tx, self.event_bus.clone())
    }

    /// Handle of a live session.
    pub async fn session(&self, id: SessionId) -> Result<SessionHandle> {
        self.registry
            .get(id)
            .await
            .ok_or(RuntimeError::SessionNotFound(id))
    }

    /// Ids of all live sessions.
    pub async fn sessions(&self) -> Vec<SessionId> {
        self.registry.ids().await
    }

    /// Load a session from the store and start a worker for it.
    ///
    /// Returns the existing handle when the session is already live. A
    /// finished session is not brought back: it fails with
    /// [`RuntimeError::SessionEnded`] and no worker is started.
    pub async fn resume_session(&self, id: SessionId) -> Result<SessionHandle> {
        if let Some(handle) = self.registry.get(id).await {
            return Ok(handle);
        }

        let store = Arc::clone(&self.store);
        let load = tokio::task::spawn_blocking(move || store.load(id));
        let state = match tokio::time::timeout(self.config.store_timeout, load).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join_error)) => return Err(RuntimeError::WorkerJoin(join_error)),
            Err(_) => return Err(RuntimeError::PersistenceTimeout(self.config.store_timeout)),
        }
        .ok_or(RuntimeError::SessionNotFound(id))?;

        if state.is_over() {
            info!(target: "runtime", session = %id, "refusing to resume a finished session");
            return Err(RuntimeError::SessionEnded(id));
        }

        let handle = self.spawn_worker(state).await;
        self.registry.insert(handle.clone()).await;

        info!(target: "runtime", session = %id, "session resumed");
        self.event_bus
            .publish(Event::Session(SessionEvent::Resumed { session: id }));

        Ok(handle)
    }

    pub async fn submit_mulligan(
        &self,
        session: SessionId,
        player: PlayerId,
        redraw: bool,
    ) -> Result<MulliganResponse> {
        self.session(session)
            .await?
            .submit_mulligan(player, redraw)
            .await
    }

    /// Submit a raw `{player_id, action_type, payload}` action.
    pub async fn submit_action(
        &self,
        session: SessionId,
        submission: ActionSubmission,
    ) -> Result<ActionResponse> {
        self.session(session).await?.submit_action(submission).await
    }

    /// Submit an already typed action.
    pub async fn submit(&self, session: SessionId, action: Action) -> Result<ActionResponse> {
        self.session(session).await?.submit(action).await
    }

    /// Ask `provider` for the active player's action and submit it.
    pub async fn step(
        &self,
        session: SessionId,
        provider: &dyn ActionProvider,
    ) -> Result<ActionResponse> {
        let handle = self.session(session).await?;
        let snapshot = handle.query_state().await?;
        let player = snapshot.turn.active_player;
        let action = provider.provide_action(player, &snapshot).await?;
        handle.submit(action).await
    }

    /// Subscribe to runtime events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Shutdown the runtime gracefully
    ///
    /// Drops the registry's handles and waits for every worker. Handles held
    /// elsewhere keep their worker alive, so drop them first.
    pub async fn shutdown(self) -> Result<()> {
        self.registry.clear().await;

        let workers = std::mem::take(&mut *self.workers.lock().await);
        for worker in workers {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<CardCatalog>>,
    store: Option<Arc<dyn SessionStore>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            store: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required card catalog
    pub fn catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Set session store (optional)
    ///
    /// Defaults to a [`FileSessionStore`] under `config.data_dir` when one is
    /// configured, and to an [`InMemorySessionStore`] otherwise.
    pub fn store(mut self, store: impl SessionStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;

        let store: Arc<dyn SessionStore> = match (self.store, &self.config.data_dir) {
            (Some(store), _) => store,
            (None, Some(dir)) => Arc::new(FileSessionStore::new(dir)?),
            (None, None) => Arc::new(InMemorySessionStore::new()),
        };

        let oracles = OracleManager::new(catalog, self.config.game_config.clone());
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        Ok(Runtime {
            config: self.config,
            oracles,
            store,
            event_bus,
            registry: SessionRegistry::new(),
            workers: Mutex::new(Vec::new()),
        })
    }
}
