//! Traits describing read-only match data.
//!
//! Oracles expose the card catalog and the deterministic RNG. The [`Env`]
//! aggregate bundles them with the rule configuration so the engine can reach
//! everything it needs without coupling to concrete implementations.
mod catalog;
mod error;
mod rng;

pub use catalog::CardOracle;
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed, shuffle};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by setup and the action pipeline.
pub struct Env<'a, C, R>
where
    C: CardOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    catalog: Option<&'a C>,
    rng: Option<&'a R>,
    config: &'a GameConfig,
}

impl<C, R> Clone for Env<'_, C, R>
where
    C: CardOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, R> Copy for Env<'_, C, R>
where
    C: CardOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn CardOracle + 'a, dyn RngOracle + 'a>;

impl<'a, C, R> Env<'a, C, R>
where
    C: CardOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(catalog: Option<&'a C>, rng: Option<&'a R>, config: &'a GameConfig) -> Self {
        Self {
            catalog,
            rng,
            config,
        }
    }

    pub fn with_all(catalog: &'a C, rng: &'a R, config: &'a GameConfig) -> Self {
        Self::new(Some(catalog), Some(rng), config)
    }

    /// Returns the card catalog, or an error if not available.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl<'a, C, R> Env<'a, C, R>
where
    C: CardOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let catalog: Option<&'a dyn CardOracle> = self.catalog.map(|catalog| catalog as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(catalog, rng, self.config)
    }
}

impl<'a> GameEnv<'a> {
    /// Environment with no oracles; enough for every in-match action.
    pub fn rules_only(config: &'a GameConfig) -> Self {
        Env::new(None, None, config)
    }
}
