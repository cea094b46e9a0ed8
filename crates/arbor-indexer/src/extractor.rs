//! Scanner trait definition

use arbor_core::SymbolDraft;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source languages the indexer can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanLanguage {
    /// Scanned from a tree-sitter parse tree.
    Python,
    /// Scanned with regular expressions over the raw text.
    TypeScript,
}

impl ScanLanguage {
    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Some(ScanLanguage::Python),
            Some("ts") | Some("tsx") => Some(ScanLanguage::TypeScript),
            _ => None,
        }
    }
}

/// Options shared by every scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub context_lines: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            context_lines: crate::config::SNIPPET_CONTEXT_LINES,
        }
    }
}

/// Extracts symbol declarations and their raw call references from one file.
///
/// Implementations never fail: content they cannot make sense of yields an
/// empty list.
pub trait SymbolScanner: Send + Sync {
    fn language(&self) -> ScanLanguage;

    /// `file_path` is recorded on every draft and folded into its id.
    fn scan(&self, file_path: &str, source: &str) -> Vec<SymbolDraft>;
}
