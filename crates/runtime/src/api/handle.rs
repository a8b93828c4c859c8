//! Cloneable façade for issuing commands to one session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! submitting actions, querying the session or streaming events.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{Action, GameState, PlayerId, SessionId};

use super::errors::{Result, RuntimeError};
use super::submission::{ActionResponse, ActionSubmission, MulliganResponse};
use crate::events::{Event, EventBus, Topic};
use crate::workers::SessionCommand;

/// Client-facing handle to a running session worker
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    command_tx: mpsc::Sender<SessionCommand>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        command_tx: mpsc::Sender<SessionCommand>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submit a raw `{player_id, action_type, payload}` action.
    ///
    /// Decoding failures are logged in the session like any other rejection
    /// and come back as an unsuccessful [`ActionResponse`].
    pub async fn submit_action(&self, submission: ActionSubmission) -> Result<ActionResponse> {
        self.request(|reply| SessionCommand::Submit { submission, reply })
            .await
    }

    /// Submit an already typed action
    pub async fn submit(&self, action: Action) -> Result<ActionResponse> {
        self.request(|reply| SessionCommand::SubmitTyped { action, reply })
            .await
    }

    /// Record a mulligan decision. Returns the events it produced and whether
    /// the resulting state was saved.
    pub async fn submit_mulligan(
        &self,
        player: PlayerId,
        redraw: bool,
    ) -> Result<MulliganResponse> {
        self.request(|reply| SessionCommand::Mulligan {
            player,
            redraw,
            reply,
        })
        .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| SessionCommand::QueryState { reply })
            .await
    }

    /// Write the current state to the session store again.
    ///
    /// Used after a reply reported `persisted = false`.
    pub async fn persist(&self) -> Result<()> {
        self.request(|reply| SessionCommand::Persist { reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// The bus is shared by every session of the runtime; filter with
    /// [`Event::session`] to follow only this one.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
