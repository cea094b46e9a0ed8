//! TypeScript scanner using regular expressions
//!
//! There is no parse tree here, so results are approximate. References are
//! collected per file, not per symbol: every declaration in a file receives
//! the file's whole set of call-like identifiers, minus its own name.

use crate::extractor::{ScanLanguage, ScanOptions, SymbolScanner};
use crate::snippet::extract_snippet;
use arbor_core::{SymbolDraft, SymbolKind};
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

static FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?function\s+(?P<name>[A-Za-z0-9_]+)\s*\(")
        .expect("function pattern is valid")
});

static CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?class\s+(?P<name>[A-Za-z0-9_]+)").expect("class pattern is valid")
});

static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<name>[A-Za-z0-9_]+)\s*\(").expect("call pattern is valid")
});

/// Keywords that look like calls when followed by a parenthesis.
const CONTROL_FLOW_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "return"];

pub struct TypeScriptScanner {
    options: ScanOptions,
}

impl TypeScriptScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    fn build_symbol(
        &self,
        file_path: &str,
        source: &str,
        captures: &Captures,
        kind: SymbolKind,
    ) -> Option<SymbolDraft> {
        let whole = captures.get(0)?;
        let name = captures.name("name")?.as_str();
        let (line, column) = line_and_column(source, whole.start());
        let snippet = extract_snippet(source, line, self.options.context_lines);
        Some(SymbolDraft::new(
            file_path,
            name,
            kind,
            line,
            column,
            snippet.text,
            snippet.start_line,
        ))
    }
}

impl Default for TypeScriptScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl SymbolScanner for TypeScriptScanner {
    fn language(&self) -> ScanLanguage {
        ScanLanguage::TypeScript
    }

    fn scan(&self, file_path: &str, source: &str) -> Vec<SymbolDraft> {
        let mut symbols = Vec::new();
        // Offsets of declared function names, so `function a(` is not read as a call to `a`.
        let mut declaration_sites = HashSet::new();

        for captures in FUNCTION_PATTERN.captures_iter(source) {
            if let Some(name) = captures.name("name") {
                declaration_sites.insert(name.start());
            }
            symbols.extend(self.build_symbol(file_path, source, &captures, SymbolKind::Function));
        }
        for captures in CLASS_PATTERN.captures_iter(source) {
            symbols.extend(self.build_symbol(file_path, source, &captures, SymbolKind::Class));
        }

        if symbols.is_empty() {
            return symbols;
        }

        let calls: BTreeSet<&str> = CALL_PATTERN
            .captures_iter(source)
            .filter_map(|captures| captures.name("name"))
            .filter(|name| !declaration_sites.contains(&name.start()))
            .map(|name| name.as_str())
            .filter(|name| !CONTROL_FLOW_KEYWORDS.contains(name))
            .collect();

        for symbol in &mut symbols {
            symbol.references = calls
                .iter()
                .filter(|call| **call != symbol.name)
                .map(|call| call.to_string())
                .collect();
        }

        tracing::trace!(
            file = file_path,
            symbols = symbols.len(),
            calls = calls.len(),
            "Scanned TypeScript file"
        );
        symbols
    }
}

/// 1-indexed line and 0-indexed character column of a byte offset.
fn line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count();
    (line, column)
}
