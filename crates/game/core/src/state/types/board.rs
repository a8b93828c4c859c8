//! Board zones and cards in play.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;

use super::card::{Card, CardType};
use super::common::{CardInstanceId, PlayerId};
use super::modifier::{Modifier, ModifierKind};

/// Bounded board zones.
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
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Zone {
    FrontLine,
    EnergyLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardPosition {
    pub zone: Zone,
    pub slot: u8,
}

impl BoardPosition {
    pub fn new(zone: Zone, slot: u8) -> Self {
        Self { zone, slot }
    }
}

bitflags! {
    /// Status bundle of a card in play. An empty set means active but unable
    /// to attack or block.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CardStatus: u8 {
        const RESTED     = 1 << 0;
        const CAN_ATTACK = 1 << 1;
        const CAN_BLOCK  = 1 << 2;
    }
}

/// A card on the board: printed snapshot plus position, status and modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInPlay {
    pub card: Card,
    pub position: BoardPosition,
    pub status: CardStatus,
    pub modifiers: Vec<Modifier>,
    pub owner: PlayerId,
}

impl CardInPlay {
    pub fn new(card: Card, position: BoardPosition, status: CardStatus, owner: PlayerId) -> Self {
        Self {
            card,
            position,
            status,
            modifiers: Vec::new(),
            owner,
        }
    }

    #[inline]
    pub fn id(&self) -> CardInstanceId {
        self.card.id
    }

    #[inline]
    pub fn is_character(&self) -> bool {
        self.card.card_type() == CardType::Character
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.contains(CardStatus::RESTED)
    }

    /// Active, attack-eligible and standing on the front line.
    pub fn can_attack(&self) -> bool {
        self.is_active()
            && self.status.contains(CardStatus::CAN_ATTACK)
            && self.position.zone == Zone::FrontLine
    }

    pub fn rest(&mut self) {
        self.status.insert(CardStatus::RESTED);
        self.status.remove(CardStatus::CAN_ATTACK);
    }

    /// Turn-start refresh for the owner's characters.
    pub fn refresh(&mut self) {
        self.status.remove(CardStatus::RESTED);
        if self.is_character() {
            self.status.insert(CardStatus::CAN_ATTACK);
        }
    }

    /// Sum of active `bp_boost` modifier values.
    pub fn bp_boost(&self) -> i64 {
        self.modifiers
            .iter()
            .filter(|modifier| modifier.kind == ModifierKind::BpBoost)
            .map(|modifier| modifier.value as i64)
            .sum()
    }

    /// Printed BP plus boosts, floored at zero.
    pub fn effective_bp(&self) -> u32 {
        let printed = self.card.definition.bp.unwrap_or(0) as i64;
        (printed + self.bp_boost()).clamp(0, u32::MAX as i64) as u32
    }
}

/// One bounded board line, kept sorted by slot.
pub type Line = ArrayVec<CardInPlay, { GameConfig::LINE_SLOTS }>;

/// Errors raised by board placement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    #[error("{0} is full")]
    ZoneFull(Zone),

    #[error("slot {slot} on {zone} is occupied")]
    SlotOccupied { zone: Zone, slot: u8 },

    #[error("slot {slot} does not exist")]
    InvalidSlot { slot: u8 },
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub front_line: Line,
    pub energy_line: Line,
    pub outside_area: Vec<Card>,
    pub remove_area: Vec<Card>,
    pub graveyard: Vec<Card>,
}

impl Board {
    pub fn line(&self, zone: Zone) -> &Line {
        match zone {
            Zone::FrontLine => &self.front_line,
            Zone::EnergyLine => &self.energy_line,
        }
    }

    pub fn line_mut(&mut self, zone: Zone) -> &mut Line {
        match zone {
            Zone::FrontLine => &mut self.front_line,
            Zone::EnergyLine => &mut self.energy_line,
        }
    }

    /// Cards in play, front line then energy line, each by slot.
    pub fn permanents(&self) -> impl Iterator<Item = &CardInPlay> {
        self.front_line.iter().chain(self.energy_line.iter())
    }

    pub fn permanents_mut(&mut self) -> impl Iterator<Item = &mut CardInPlay> {
        self.front_line.iter_mut().chain(self.energy_line.iter_mut())
    }

    pub fn find(&self, id: CardInstanceId) -> Option<&CardInPlay> {
        self.permanents().find(|card| card.id() == id)
    }

    pub fn find_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInPlay> {
        self.permanents_mut().find(|card| card.id() == id)
    }

    pub fn character_count(&self) -> usize {
        self.permanents().filter(|card| card.is_character()).count()
    }

    pub fn is_slot_free(&self, zone: Zone, slot: u8) -> bool {
        !self
            .line(zone)
            .iter()
            .any(|card| card.position.slot == slot)
    }

    /// Lowest free slot on `zone`.
    pub fn free_slot(&self, zone: Zone) -> Option<u8> {
        (0..GameConfig::LINE_SLOTS as u8).find(|slot| self.is_slot_free(zone, *slot))
    }

    /// Resolves the slot a card would take on `zone`, checking capacity.
    pub fn target_slot(&self, zone: Zone, requested: Option<u8>) -> Result<u8, BoardError> {
        match requested {
            Some(slot) if slot as usize >= GameConfig::LINE_SLOTS => {
                Err(BoardError::InvalidSlot { slot })
            }
            Some(slot) if !self.is_slot_free(zone, slot) => {
                Err(BoardError::SlotOccupied { zone, slot })
            }
            Some(slot) => Ok(slot),
            None => self.free_slot(zone).ok_or(BoardError::ZoneFull(zone)),
        }
    }

    /// Places a card at `card.position`, keeping the line sorted by slot.
    pub fn place(&mut self, card: CardInPlay) -> Result<(), BoardError> {
        let zone = card.position.zone;
        let slot = card.position.slot;
        if slot as usize >= GameConfig::LINE_SLOTS {
            return Err(BoardError::InvalidSlot { slot });
        }
        if !self.is_slot_free(zone, slot) {
            return Err(BoardError::SlotOccupied { zone, slot });
        }
        let line = self.line_mut(zone);
        let index = line
            .iter()
            .position(|existing| existing.position.slot > slot)
            .unwrap_or(line.len());
        line.try_insert(index, card)
            .map_err(|_| BoardError::ZoneFull(zone))
    }

    /// Removes a card from whichever line holds it.
    pub fn take(&mut self, id: CardInstanceId) -> Option<CardInPlay> {
        for zone in [Zone::FrontLine, Zone::EnergyLine] {
            let line = self.line_mut(zone);
            if let Some(index) = line.iter().position(|card| card.id() == id) {
                return Some(line.remove(index));
            }
        }
        None
    }

    /// Removes a card from play into the outside area, recording it in the graveyard.
    pub fn retire(&mut self, id: CardInstanceId) -> Option<Card> {
        let retired = self.take(id)?.card;
        self.graveyard.push(retired.clone());
        self.outside_area.push(retired.clone());
        Some(retired)
    }
}
