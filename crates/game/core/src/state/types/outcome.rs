use super::common::PlayerId;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WinReason {
    /// Loser's life area was empty.
    LifeAreaEmpty,
    /// Loser could not draw in their own Start phase.
    DeckOut,
    Surrender,
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub reason: WinReason,
}
