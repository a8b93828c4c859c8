//! Per-player resources and card zones.

use super::board::Board;
use super::card::{Card, Color, EnergyMap};
use super::common::{CardInstanceId, PlayerId};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub ap: u32,
    pub max_ap: u32,
    pub energy: EnergyMap,
    pub hand: Vec<Card>,
    /// Index 0 is the top of the deck.
    pub deck: Vec<Card>,
    /// Face-down life cards. Index 0 is the top.
    pub life_area: Vec<Card>,
    pub board: Board,
    pub extra_draw_used: bool,
    /// `Some(true)` once the player chose to redraw, `Some(false)` to keep.
    pub mulligan: Option<bool>,
    /// Turns this player has started; drives the AP schedule.
    pub turns_taken: u32,
}

impl PlayerState {
    pub fn new(id: PlayerId, deck: Vec<Card>) -> Self {
        Self {
            id,
            ap: 0,
            max_ap: 0,
            energy: EnergyMap::new(),
            hand: Vec::new(),
            deck,
            life_area: Vec::new(),
            board: Board::default(),
            extra_draw_used: false,
            mulligan: None,
            turns_taken: 0,
        }
    }

    /// Moves the top card of the deck to the hand.
    pub fn draw(&mut self) -> Option<CardInstanceId> {
        if self.deck.is_empty() {
            return None;
        }
        let card = self.deck.remove(0);
        let id = card.id;
        self.hand.push(card);
        Some(id)
    }

    /// Draws up to `count` cards, stopping when the deck runs out.
    pub fn draw_many(&mut self, count: usize) -> Vec<CardInstanceId> {
        (0..count).map_while(|_| self.draw()).collect()
    }

    pub fn hand_index(&self, id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == id)
    }

    pub fn energy_of(&self, color: Color) -> u32 {
        self.energy.get(&color).copied().unwrap_or(0)
    }

    /// First colour whose pool is below `cost`, with the shortfall.
    pub fn missing_energy(&self, cost: &EnergyMap) -> Option<(Color, u32, u32)> {
        cost.iter()
            .map(|(color, required)| (*color, *required, self.energy_of(*color)))
            .find(|(_, required, available)| available < required)
    }

    /// Subtracts `cost` per colour, flooring at zero.
    pub fn pay_energy(&mut self, cost: &EnergyMap) {
        for (color, amount) in cost {
            let pool = self.energy.entry(*color).or_insert(0);
            *pool = pool.saturating_sub(*amount);
        }
    }

    pub fn add_energy(&mut self, produce: &EnergyMap) {
        for (color, amount) in produce {
            let pool = self.energy.entry(*color).or_insert(0);
            *pool = pool.saturating_add(*amount);
        }
    }

    /// Applies a signed per-colour delta, flooring at zero.
    pub fn adjust_energy(&mut self, color: Color, delta: i32) {
        let pool = self.energy.entry(color).or_insert(0);
        *pool = if delta >= 0 {
            pool.saturating_add(delta as u32)
        } else {
            pool.saturating_sub(delta.unsigned_abs())
        };
    }

    pub fn spend_ap(&mut self, amount: u32) -> bool {
        if self.ap < amount {
            return false;
        }
        self.ap -= amount;
        true
    }
}
