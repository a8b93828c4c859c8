use super::common::PlayerId;

/// Phases of a player's turn, in order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Phase {
    #[default]
    Start,
    Move,
    Main,
    Attack,
    End,
}

impl Phase {
    /// The following phase within the same turn; `None` after `End`.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Start => Some(Phase::Move),
            Phase::Move => Some(Phase::Main),
            Phase::Main => Some(Phase::Attack),
            Phase::Attack => Some(Phase::End),
            Phase::End => None,
        }
    }
}

/// Turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Global turn counter, starting at 1. Incremented at every hand-over.
    pub number: u32,
    pub phase: Phase,
    pub active_player: PlayerId,
    /// Count of processed submissions; doubles as the action log id.
    pub nonce: u64,
}

impl TurnState {
    pub fn new(active_player: PlayerId) -> Self {
        Self {
            number: 1,
            phase: Phase::Start,
            active_player,
            nonce: 0,
        }
    }
}
