//! Analyzer configuration, read from `.arbor.toml` at the repository root

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up at the repository root.
pub const CONFIG_FILE: &str = ".arbor.toml";

/// Lines of context on each side of a declaration in a snippet.
pub const SNIPPET_CONTEXT_LINES: usize = 8;

/// Directory names never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".pnpm-store",
    ".turbo",
    ".next",
    "dist",
    "build",
    "coverage",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Directories to scan, relative to the repository root.
    pub source_dirs: Vec<PathBuf>,
    pub ignored_dirs: Vec<String>,
    /// Glob patterns matched against root-relative paths.
    pub exclude: Vec<String>,
    pub snippet_context_lines: usize,
    /// Scan files on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            source_dirs: vec![PathBuf::from(".")],
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|d| d.to_string()).collect(),
            exclude: Vec::new(),
            snippet_context_lines: SNIPPET_CONTEXT_LINES,
            parallel: true,
        }
    }
}

impl AnalyzerConfig {
    /// Load `<root>/.arbor.toml`, falling back to defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load an explicit config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| IndexError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
