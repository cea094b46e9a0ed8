//! File discovery, language scanning and graph building

pub mod coordinator;
pub mod error;
pub mod extractor;
pub mod languages;
pub mod config;
pub mod snippet;
pub mod walker;


#[cfg(test)]
pub mod test_utils;

pub use config::AnalyzerConfig;
pub use coordinator::{Coordinator, IndexStats};
pub use error::{read_source, IndexError, Result};
pub use extractor::{ScanLanguage, ScanOptions, SymbolScanner};
pub use languages::{scan, scanner_for};
pub use snippet::{extract_snippet, Snippet};
pub use walker::SourceFile;
