//! Source file discovery

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::extractor::ScanLanguage;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A file selected for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Root-relative, `/`-separated. Used as the symbol file path.
    pub relative_path: String,
    pub language: ScanLanguage,
}

/// Compile exclude patterns into one matcher.
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
        debug!("Added exclude pattern: {}", pattern);
    }
    Ok(builder.build()?)
}

/// Walk every configured source directory under `root`, in file-name order.
///
/// Missing source directories are skipped. Ignored directory names are never
/// descended into, and a file reachable from two source directories is
/// returned once.
pub fn discover_files(root: &Path, config: &AnalyzerConfig, exclude: &GlobSet) -> Vec<SourceFile> {
    let ignored: HashSet<String> = config.ignored_dirs.iter().cloned().collect();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for dir in &config.source_dirs {
        let base = root.join(dir);
        if !base.is_dir() {
            debug!("Source directory {} does not exist, skipping", base.display());
            continue;
        }

        let ignored = ignored.clone();
        let walker = WalkBuilder::new(&base)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && ignored.contains(entry.file_name().to_string_lossy().as_ref()))
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walker error: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let Some(language) = ScanLanguage::from_path(path) else {
                continue;
            };
            let relative_path = relative_path(root, path);
            if exclude.is_match(&relative_path) {
                debug!("Excluded {}", relative_path);
                continue;
            }
            if !seen.insert(relative_path.clone()) {
                continue;
            }

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative_path,
                language,
            });
        }
    }

    debug!("Discovered {} source files under {}", files.len(), root.display());
    files
}

/// `path` relative to `root`, joined with `/` regardless of platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
