//! Orchestrates discovery, scanning and graph assembly

use crate::config::AnalyzerConfig;
use crate::error::{read_source, Result};
use crate::extractor::ScanOptions;
use crate::languages::scanner_for;
use crate::walker::{build_exclude_set, discover_files, SourceFile};
use arbor_core::{assemble, GraphCache, SymbolDraft, SymbolGraph};
use globset::GlobSet;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counters for one pass over the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub symbols: usize,
}

/// Builds the symbol graph of one repository and owns its cache.
pub struct Coordinator {
    root: PathBuf,
    config: AnalyzerConfig,
    exclude: GlobSet,
    cache: Arc<GraphCache>,
}

impl Coordinator {
    pub fn new(root: impl Into<PathBuf>, config: AnalyzerConfig) -> Result<Self> {
        Self::with_cache(root, config, Arc::new(GraphCache::new()))
    }

    /// Use a cache shared with other components.
    pub fn with_cache(
        root: impl Into<PathBuf>,
        config: AnalyzerConfig,
        cache: Arc<GraphCache>,
    ) -> Result<Self> {
        let exclude = build_exclude_set(&config.exclude)?;
        Ok(Coordinator {
            root: root.into(),
            config,
            exclude,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.cache
    }

    /// The cached graph, built on first use.
    pub fn analyze(&self) -> Arc<SymbolGraph> {
        self.cache.get_or_compute(|| self.run_full_index())
    }

    /// Forget the cached graph; the next [`Coordinator::analyze`] rebuilds it.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Build the graph from scratch, bypassing the cache.
    pub fn run_full_index(&self) -> SymbolGraph {
        info!("Indexing repository: {}", self.root.display());
        let (drafts, stats) = self.collect_drafts();
        let graph = assemble(drafts);
        info!(
            files = stats.files_scanned,
            skipped = stats.files_skipped,
            symbols = graph.symbol_count(),
            edges = graph.edge_count(),
            "Indexed repository"
        );
        graph
    }

    pub fn discover(&self) -> Vec<SourceFile> {
        discover_files(&self.root, &self.config, &self.exclude)
    }

    /// Scan every discovered file, keeping drafts in traversal order.
    ///
    /// Files are scanned independently (in parallel when configured); files
    /// that cannot be read are logged and skipped.
    pub fn collect_drafts(&self) -> (Vec<SymbolDraft>, IndexStats) {
        let files = self.discover();
        let results: Vec<(&SourceFile, Result<Vec<SymbolDraft>>)> = if self.config.parallel {
            files.par_iter().map(|file| (file, self.scan_file(file))).collect()
        } else {
            files.iter().map(|file| (file, self.scan_file(file))).collect()
        };

        let mut stats = IndexStats::default();
        let mut drafts = Vec::new();
        for (file, result) in results {
            match result {
                Ok(file_drafts) => {
                    stats.files_scanned += 1;
                    drafts.extend(file_drafts);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file.relative_path, e);
                    stats.files_skipped += 1;
                }
            }
        }
        stats.symbols = drafts.len();
        (drafts, stats)
    }

    /// Read and scan a single file.
    pub fn scan_file(&self, file: &SourceFile) -> Result<Vec<SymbolDraft>> {
        let source = read_source(&file.path)?;
        let options = ScanOptions {
            context_lines: self.config.snippet_context_lines,
        };
        let drafts = scanner_for(file.language, options).scan(&file.relative_path, &source);
        debug!("Scanned {}: {} symbols", file.relative_path, drafts.len());
        Ok(drafts)
    }
}
