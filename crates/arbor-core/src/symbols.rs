//! Symbol table for cross-file resolution

use crate::model::SymbolId;
use dashmap::DashMap;

/// Symbol table mapping bare names to every symbol declared under that name,
/// in the order they were inserted. Thread-safe for concurrent access.
pub struct SymbolTable {
    symbols: DashMap<String, Vec<SymbolId>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: DashMap::new(),
        }
    }

    /// Insert a symbol under its name, after any earlier symbol with that name.
    pub fn insert(&self, name: &str, symbol_id: SymbolId) {
        self.symbols
            .entry(name.to_string())
            .or_default()
            .push(symbol_id);
    }

    /// Resolve a name to a single symbol: the first one inserted under it.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .get(name)
            .and_then(|candidates| candidates.value().first().cloned())
    }

    /// All symbols sharing a name, in insertion order.
    pub fn candidates(&self, name: &str) -> Vec<SymbolId> {
        self.symbols
            .get(name)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
