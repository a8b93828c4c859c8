//! Append-only record of submitted actions.

use crate::action::ActionParams;

use super::common::PlayerId;
use super::turn::Phase;

/// Payload as the pipeline saw it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoggedPayload {
    Decoded(ActionParams),
    /// Raw payload that failed to decode at the boundary.
    Malformed(String),
}

/// Immutable record of one submission, valid or not.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLogEntry {
    pub id: u64,
    pub player: PlayerId,
    pub action_type: String,
    pub payload: LoggedPayload,
    pub turn: u32,
    pub phase: Phase,
    pub timestamp_ms: i64,
    pub valid: bool,
    pub error: Option<String>,
}

/// Append-only action log. Entries are never mutated after insertion.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
}

impl ActionLog {
    pub(crate) fn append(&mut self, entry: ActionLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ActionLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().filter(|entry| !entry.valid)
    }
}
