//! Error types for indexing

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or running an analysis.
///
/// `Io` and `Encoding` are per-file: the coordinator logs them and skips the
/// file. The remaining variants are raised before any scanning starts.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("unsupported file type: {}", path.display())]
    UnsupportedLanguage { path: PathBuf },
}

impl IndexError {
    /// Whether this error concerns a single file and can be skipped.
    pub fn is_per_file(&self) -> bool {
        matches!(self, IndexError::Io { .. } | IndexError::Encoding { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;

/// Read a source file as strict UTF-8.
pub fn read_source(path: &std::path::Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| IndexError::Encoding {
        path: path.to_path_buf(),
    })
}
