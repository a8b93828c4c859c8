//! [`battle_core::CardOracle`] backed by an in-memory map.

use std::collections::HashMap;
use std::path::Path;

use battle_core::{CardCode, CardDefinition, CardOracle};

use crate::api::{Result, RuntimeError};

/// Card catalog with static definitions keyed by code.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    definitions: HashMap<CardCode, CardDefinition>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card definition, replacing any previous one with the same code.
    pub fn add_definition(&mut self, definition: CardDefinition) {
        self.definitions.insert(definition.code.clone(), definition);
    }

    pub fn with_definitions(definitions: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.add_definition(definition);
        }
        catalog
    }

    /// Parse a JSON array of card definitions.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definitions: Vec<CardDefinition> =
            serde_json::from_str(json).map_err(|e| RuntimeError::Catalog(e.to_string()))?;
        Ok(Self::with_definitions(definitions))
    }

    /// Load a JSON array of card definitions from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RuntimeError::Catalog(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl CardOracle for CardCatalog {
    fn definition(&self, code: &CardCode) -> Option<CardDefinition> {
        self.definitions.get(code).cloned()
    }
}
