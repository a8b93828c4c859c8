//! Runtime wrappers around static game content oracles.
//!
//! The card catalog implements `battle-core`'s oracle trait and is bundled
//! with the RNG and rule config into an [`OracleManager`], so the runtime can
//! build [`battle_core::Env`] snapshots on demand. The data is immutable at
//! runtime; dynamic state lives in session stores.
mod catalog;
mod starter;

use std::sync::Arc;

use battle_core::{Env, GameConfig, GameEnv, PcgRng};

pub use catalog::CardCatalog;
pub use starter::{blue_deck, red_deck, starter_cards, starter_catalog};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<CardCatalog>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(catalog: Arc<CardCatalog>, config: GameConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts oracle manager into GameEnv for battle-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(self.catalog.as_ref(), &self.rng, self.config.as_ref()).into_game_env()
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
