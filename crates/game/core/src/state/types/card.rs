//! Printed card data and per-session card instances.

use std::collections::BTreeMap;

use crate::action::effect::{Effect, TriggeredEffect};

use super::common::{CardCode, CardInstanceId};

/// Printed card category. Determines where a played card goes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CardType {
    /// Fights on the front line or waits on the energy line.
    Character,
    /// Sits on the energy line and produces energy.
    Field,
    /// Resolves its play effects, then goes to the graveyard.
    Event,
    /// Non-physical AP marker. Never legal in a deck.
    Ap,
}

/// Card colour; also the key of energy pools.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum Color {
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
}

/// Energy amounts keyed by colour. Ordered so iteration is deterministic.
pub type EnergyMap = BTreeMap<Color, u32>;

/// Printed keyword abilities with rules meaning.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Keyword {
    /// Attacks on a player reveal two life cards instead of one.
    DoubleDamage,
    /// May attack the turn it is played.
    Rush,
}

/// Innate trigger that resolves when the card is revealed from a life area.
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
    strum::IntoStaticStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LifeTrigger {
    #[default]
    Nil,
    DrawCard,
    Color,
    #[strum(serialize = "ACTIVE_BP_3000")]
    #[cfg_attr(feature = "serde", serde(rename = "ACTIVE_BP_3000"))]
    ActiveBp3000,
    AddToHand,
    RushOrAddToHand,
    Special,
    Final,
}

/// Immutable printed attributes of a catalog card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub code: CardCode,
    pub name: String,
    pub card_type: CardType,
    pub color: Color,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ap_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: EnergyMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_produce: EnergyMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Vec<Keyword>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub life_trigger: LifeTrigger,
    /// Effects resolved when an Event card is played.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_play: Vec<Effect>,
    /// Effects that fire while the card is in play.
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<TriggeredEffect>,
}

impl CardDefinition {
    pub fn new(
        code: impl Into<CardCode>,
        name: impl Into<String>,
        card_type: CardType,
        color: Color,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            card_type,
            color,
            bp: None,
            ap_cost: 0,
            energy_cost: EnergyMap::new(),
            energy_produce: EnergyMap::new(),
            keywords: Vec::new(),
            life_trigger: LifeTrigger::Nil,
            on_play: Vec::new(),
            triggers: Vec::new(),
        }
    }

    pub fn with_bp(mut self, bp: u32) -> Self {
        self.bp = Some(bp);
        self
    }

    pub fn with_ap_cost(mut self, ap_cost: u32) -> Self {
        self.ap_cost = ap_cost;
        self
    }

    pub fn with_energy_cost(mut self, color: Color, amount: u32) -> Self {
        self.energy_cost.insert(color, amount);
        self
    }

    pub fn with_energy_produce(mut self, color: Color, amount: u32) -> Self {
        self.energy_produce.insert(color, amount);
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn with_life_trigger(mut self, trigger: LifeTrigger) -> Self {
        self.life_trigger = trigger;
        self
    }

    pub fn with_on_play(mut self, effect: Effect) -> Self {
        self.on_play.push(effect);
        self
    }

    pub fn with_trigger(mut self, trigger: TriggeredEffect) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }
}

/// A physical card owned by a session: instance id plus printed snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardInstanceId,
    pub definition: CardDefinition,
}

impl Card {
    pub fn new(id: CardInstanceId, definition: CardDefinition) -> Self {
        Self { id, definition }
    }

    #[inline]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }

    #[inline]
    pub fn code(&self) -> &CardCode {
        &self.definition.code
    }
}
