//! Arbor core: symbol model, graph assembly and the graph cache

pub mod graph;
pub mod model;
pub mod symbols;
pub mod cache;


pub use model::{SymbolId, SymbolKind, SymbolDraft, Symbol, DependencyEdge};
pub use graph::{SymbolGraph, assemble};
pub use symbols::SymbolTable;
pub use cache::GraphCache;
