use crate::state::{CardCode, CardDefinition};

use super::OracleError;

/// Read-only access to printed card attributes.
///
/// The engine never mutates catalog data; every session takes its own copy of
/// a definition when a deck list is resolved.
pub trait CardOracle: Send + Sync {
    fn definition(&self, code: &CardCode) -> Option<CardDefinition>;

    fn resolve(&self, code: &CardCode) -> Result<CardDefinition, OracleError> {
        self.definition(code)
            .ok_or_else(|| OracleError::CardNotFound(code.clone()))
    }
}
