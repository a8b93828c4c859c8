//! Effect kind enum.
//!
//! Wraps every concrete effect struct so card data can carry them and
//! [`super::apply_effect`] can dispatch on them with one exhaustive match.

use crate::state::CardCode;

use super::damage::DamageEffect;
use super::displacement::{DestroyEffect, MoveEffect, ReturnToHandEffect};
use super::resource::{DrawEffect, EnergyEffect};
use super::status::{BoostEffect, DebuffEffect};

/// The actual effect to apply.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectKind {
    // ========================================================================
    // Damage
    // ========================================================================
    Damage(DamageEffect),

    // ========================================================================
    // Resources
    // ========================================================================
    Draw(DrawEffect),
    Energy(EnergyEffect),

    // ========================================================================
    // Battle points
    // ========================================================================
    Boost(BoostEffect),
    Debuff(DebuffEffect),

    // ========================================================================
    // Displacement
    // ========================================================================
    Destroy(DestroyEffect),
    Move(MoveEffect),
    ReturnToHand(ReturnToHandEffect),

    // ========================================================================
    // Unimplemented (accepted in card data, rejected on resolution)
    // ========================================================================
    Heal {
        amount: u32,
    },
    Search {
        count: u32,
    },
    Summon {
        code: CardCode,
    },
}

impl EffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Damage(_) => "damage",
            Self::Draw(_) => "draw",
            Self::Energy(_) => "energy",
            Self::Boost(_) => "boost",
            Self::Debuff(_) => "debuff",
            Self::Destroy(_) => "destroy",
            Self::Move(_) => "move",
            Self::ReturnToHand(_) => "return_to_hand",
            Self::Heal { .. } => "heal",
            Self::Search { .. } => "search",
            Self::Summon { .. } => "summon",
        }
    }
}
