//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CardCode;

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Card catalog is not available in the environment.
    #[error("card catalog not available")]
    CatalogNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Catalog has no entry for the requested code.
    #[error("card {0} not found in catalog")]
    CardNotFound(CardCode),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CatalogNotAvailable | Self::RngNotAvailable => ErrorSeverity::Internal,
            Self::CardNotFound(_) => ErrorSeverity::Resource,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            Self::CardNotFound(_) => "ORACLE_CARD_NOT_FOUND",
        }
    }
}
