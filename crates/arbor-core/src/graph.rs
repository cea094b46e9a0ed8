//! Graph assembly: resolves scanner references into a deduplicated symbol graph

use crate::model::*;
use crate::symbols::SymbolTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// The symbol graph: symbols in discovery order and call edges sorted by
/// `(source, target)`.
///
/// Built once by [`assemble`] and never mutated afterwards. Every edge
/// endpoint names a symbol in `symbols`, and symbol ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolGraph {
    symbols: Vec<Symbol>,
    edges: Vec<DependencyEdge>,
}

impl SymbolGraph {
    /// All symbols, in file traversal order then declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// All edges, sorted lexicographically by `(source, target)`.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get a symbol by ID.
    pub fn symbol(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| &s.id == id)
    }

    /// Find all symbols with the given bare name.
    pub fn symbols_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    /// Get all outgoing edges from a symbol.
    pub fn edges_from<'a>(&'a self, source: &'a SymbolId) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges.iter().filter(move |e| &e.source_id == source)
    }

    /// Get all incoming edges to a symbol.
    pub fn edges_to<'a>(&'a self, target: &'a SymbolId) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges.iter().filter(move |e| &e.target_id == target)
    }

    /// Check if an edge exists between two symbols.
    pub fn has_edge_between(&self, source: &SymbolId, target: &SymbolId) -> bool {
        self.edges
            .iter()
            .any(|e| &e.source_id == source && &e.target_id == target)
    }
}

/// Build the symbol graph from every draft of a tree, in discovery order.
///
/// Each reference resolves to the first symbol declared under that name;
/// names with no declaration are dropped, as are references a symbol makes
/// to itself. A draft whose id was already seen is discarded.
pub fn assemble(drafts: Vec<SymbolDraft>) -> SymbolGraph {
    let mut seen = HashSet::new();
    let drafts: Vec<SymbolDraft> = drafts
        .into_iter()
        .filter(|draft| {
            let fresh = seen.insert(draft.id.clone());
            if !fresh {
                tracing::debug!(id = %draft.id, "dropping duplicate symbol draft");
            }
            fresh
        })
        .collect();

    let table = SymbolTable::new();
    for draft in &drafts {
        table.insert(&draft.name, draft.id.clone());
    }

    // BTreeSet dedupes and yields (source, target) in lexicographic order.
    let mut pairs: BTreeSet<(SymbolId, SymbolId)> = BTreeSet::new();
    let mut unresolved = 0usize;
    for draft in &drafts {
        for reference in &draft.references {
            let Some(target) = table.lookup(reference) else {
                unresolved += 1;
                continue;
            };
            if target == draft.id {
                continue;
            }
            pairs.insert((draft.id.clone(), target));
        }
    }

    let edges: Vec<DependencyEdge> = pairs
        .into_iter()
        .map(|(source, target)| DependencyEdge::new(source, target))
        .collect();
    let symbols: Vec<Symbol> = drafts.into_iter().map(Symbol::from).collect();

    tracing::debug!(
        symbols = symbols.len(),
        edges = edges.len(),
        unresolved,
        "assembled symbol graph"
    );

    SymbolGraph { symbols, edges }
}
