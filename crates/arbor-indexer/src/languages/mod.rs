//! Language scanners for the supported source languages

pub mod python;
pub mod typescript;

use crate::extractor::{ScanLanguage, ScanOptions, SymbolScanner};
use arbor_core::SymbolDraft;

/// Get the scanner for a language.
pub fn scanner_for(language: ScanLanguage, options: ScanOptions) -> Box<dyn SymbolScanner> {
    match language {
        ScanLanguage::Python => Box::new(python::PythonScanner::new(options)),
        ScanLanguage::TypeScript => Box::new(typescript::TypeScriptScanner::new(options)),
    }
}

/// Scan one file's text with default options.
pub fn scan(file_path: &str, source: &str, language: ScanLanguage) -> Vec<SymbolDraft> {
    scanner_for(language, ScanOptions::default()).scan(file_path, source)
}
