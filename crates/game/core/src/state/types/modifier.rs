//! Timed stat adjustments attached to cards in play.

use super::common::CardInstanceId;

/// What a modifier adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum ModifierKind {
    /// Added to printed BP. Negative values are debuffs.
    BpBoost,
}

/// Remaining lifetime of a modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierDuration {
    Indefinite,
    /// Number of end phases left before the modifier drops.
    Turns(u32),
}

impl ModifierDuration {
    /// Decodes the wire form where `-1` (or any negative) means indefinite.
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Self::Indefinite
        } else {
            Self::Turns(raw as u32)
        }
    }

    pub fn as_raw(&self) -> i32 {
        match self {
            Self::Indefinite => -1,
            Self::Turns(turns) => (*turns).min(i32::MAX as u32) as i32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub kind: ModifierKind,
    pub value: i32,
    pub duration: ModifierDuration,
    /// Card whose effect created the modifier, if any.
    pub source: Option<CardInstanceId>,
    /// Turn number the modifier was applied on.
    pub applied_at: u32,
}

impl Modifier {
    pub fn bp_boost(
        value: i32,
        duration: ModifierDuration,
        source: Option<CardInstanceId>,
        applied_at: u32,
    ) -> Self {
        Self {
            kind: ModifierKind::BpBoost,
            value,
            duration,
            source,
            applied_at,
        }
    }

    /// Counts down one end phase. Returns `false` once the modifier has expired.
    pub fn tick(&mut self) -> bool {
        match &mut self.duration {
            ModifierDuration::Indefinite => true,
            ModifierDuration::Turns(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_modifier_expires_after_its_turns() {
        let mut modifier = Modifier::bp_boost(1000, ModifierDuration::Turns(2), None, 1);
        assert!(modifier.tick());
        assert!(!modifier.tick());
    }

    #[test]
    fn negative_raw_duration_is_indefinite() {
        assert_eq!(ModifierDuration::from_raw(-1), ModifierDuration::Indefinite);
        let mut modifier = Modifier::bp_boost(500, ModifierDuration::from_raw(-1), None, 3);
        for _ in 0..10 {
            assert!(modifier.tick());
        }
    }
}
