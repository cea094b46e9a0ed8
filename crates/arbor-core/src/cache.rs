//! In-memory cache for the last computed symbol graph

use crate::graph::SymbolGraph;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Holds at most one computed graph.
///
/// Starts empty; the first [`GraphCache::get_or_compute`] fills it and every
/// later call returns the same `Arc` until [`GraphCache::invalidate`]. The
/// check and the fill happen under one lock, so concurrent first callers run
/// the computation once.
#[derive(Debug, Default)]
pub struct GraphCache {
    slot: Mutex<Option<Arc<SymbolGraph>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached graph, computing and storing it first if the cache is empty.
    pub fn get_or_compute<F>(&self, compute: F) -> Arc<SymbolGraph>
    where
        F: FnOnce() -> SymbolGraph,
    {
        let mut slot = self.lock();
        if let Some(graph) = slot.as_ref() {
            tracing::debug!("Symbol graph served from cache");
            return Arc::clone(graph);
        }
        let graph = Arc::new(compute());
        *slot = Some(Arc::clone(&graph));
        tracing::debug!(
            symbols = graph.symbol_count(),
            edges = graph.edge_count(),
            "Symbol graph cached"
        );
        graph
    }

    /// Return the cached graph without computing anything.
    pub fn get(&self) -> Option<Arc<SymbolGraph>> {
        self.lock().clone()
    }

    pub fn is_computed(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the cached graph so the next request recomputes it.
    ///
    /// Holders of a previously returned `Arc` keep their copy.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Symbol graph cache invalidated");
        }
    }

    // The slot only ever holds a complete graph, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<SymbolGraph>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
