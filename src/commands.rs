//! CLI command implementations

use anyhow::Context;
use arbor_indexer::{read_source, AnalyzerConfig, Coordinator, IndexError, ScanLanguage};
use serde::Serialize;
use std::path::PathBuf;

pub fn analyze(
    root: PathBuf,
    config_path: Option<PathBuf>,
    pretty: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => AnalyzerConfig::from_file(&path)?,
        None => AnalyzerConfig::load(&root)?,
    };

    let coordinator = Coordinator::new(root, config)?;
    let graph = coordinator.analyze();
    let json = to_json(graph.as_ref(), pretty)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote graph to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn scan(file: PathBuf, pretty: bool) -> anyhow::Result<()> {
    let language = ScanLanguage::from_path(&file)
        .ok_or_else(|| IndexError::UnsupportedLanguage { path: file.clone() })?;
    let source = read_source(&file)?;

    let drafts = arbor_indexer::scan(&file.to_string_lossy(), &source, language);
    tracing::debug!("{} symbols in {}", drafts.len(), file.display());

    println!("{}", to_json(&drafts, pretty)?);
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
