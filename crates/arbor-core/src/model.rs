//! Core data structures for the symbol graph

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a symbol.
///
/// Encodes the declaring file, the name and the position of the declaration,
/// so two declarations with the same name in one file never collide and the
/// same declaration gets the same id on every run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub String);

impl SymbolId {
    pub fn new(file_path: &str, name: &str, line: usize, column: usize) -> Self {
        SymbolId(format!("{file_path}:{name}:{line}:{column}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminates what kind of declaration a symbol represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Module,
    Unknown,
}

/// A symbol as produced by a scanner, before graph assembly.
///
/// `references` holds the raw identifiers observed at call sites inside the
/// declaration. They are resolved to edges by [`crate::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDraft {
    pub id: SymbolId,
    pub name: String,
    pub file_path: String,
    pub kind: SymbolKind,
    /// 1-indexed.
    pub line: usize,
    /// 0-indexed.
    pub column: usize,
    pub source_snippet: String,
    pub snippet_start_line: usize,
    pub references: BTreeSet<String>,
}

impl SymbolDraft {
    /// Create a draft with an id derived from its location and no references.
    pub fn new(
        file_path: &str,
        name: &str,
        kind: SymbolKind,
        line: usize,
        column: usize,
        source_snippet: String,
        snippet_start_line: usize,
    ) -> Self {
        SymbolDraft {
            id: SymbolId::new(file_path, name, line, column),
            name: name.to_string(),
            file_path: file_path.to_string(),
            kind,
            line,
            column,
            source_snippet,
            snippet_start_line,
            references: BTreeSet::new(),
        }
    }
}

/// A symbol in the finished graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub file_path: String,
    pub kind: SymbolKind,
    pub line: usize,
    pub column: usize,
    pub source: String,
    pub source_start_line: usize,
}

impl From<SymbolDraft> for Symbol {
    fn from(draft: SymbolDraft) -> Self {
        Symbol {
            id: draft.id,
            name: draft.name,
            file_path: draft.file_path,
            kind: draft.kind,
            line: draft.line,
            column: draft.column,
            source: draft.source_snippet,
            source_start_line: draft.snippet_start_line,
        }
    }
}

/// A directed dependency from a referencing symbol to the symbol it calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    #[serde(rename = "source")]
    pub source_id: SymbolId,
    #[serde(rename = "target")]
    pub target_id: SymbolId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DependencyEdge {
    pub fn new(source_id: SymbolId, target_id: SymbolId) -> Self {
        DependencyEdge {
            source_id,
            target_id,
            label: None,
        }
    }
}
