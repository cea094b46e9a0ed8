//! Integration tests for Arbor
//!
//! These tests drive the library and the built binary against real files on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn create_repo(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in structure {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    temp_dir
}

fn sample_repo() -> TempDir {
    create_repo(&[
        ("apps/api/routes.py", "def analyze_repository():\n    return analyse_repository()\n"),
        ("apps/api/services.py", "def analyse_repository():\n    drafts = collect()\n    return drafts\n\ndef collect():\n    return []\n"),
        ("apps/web/hooks.ts", "export function useStream() {\n  return openStream();\n}\n\nfunction openStream() {\n  return fetch(url);\n}\n"),
        ("scripts/fixit.py", "def run():\n    collect()\n"),
    ])
}

fn arbor(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arbor"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to execute arbor")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "arbor failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = Command::new(env!("CARGO_BIN_EXE_arbor"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("scan"));
}

#[test]
fn test_cli_analyze_prints_graph() {
    let repo = sample_repo();
    let payload = stdout_json(&arbor(repo.path(), &["analyze"]));

    let symbols = payload["symbols"].as_array().unwrap();
    let names: Vec<_> = symbols.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["analyze_repository", "analyse_repository", "collect", "useStream", "openStream", "run"]
    );

    let first = &symbols[0];
    assert_eq!(first["id"], "apps/api/routes.py:analyze_repository:1:0");
    assert_eq!(first["filePath"], "apps/api/routes.py");
    assert_eq!(first["kind"], "function");
    assert_eq!(first["line"], 1);
    assert_eq!(first["column"], 0);
    assert_eq!(first["sourceStartLine"], 1);
    assert!(first["source"].as_str().unwrap().contains("def analyze_repository"));

    let edges: Vec<(String, String)> = payload["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            assert!(e.get("label").is_none());
            (
                e["source"].as_str().unwrap().to_string(),
                e["target"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            (
                "apps/api/routes.py:analyze_repository:1:0".to_string(),
                "apps/api/services.py:analyse_repository:1:0".to_string()
            ),
            (
                "apps/api/services.py:analyse_repository:1:0".to_string(),
                "apps/api/services.py:collect:5:0".to_string()
            ),
            (
                "apps/web/hooks.ts:useStream:1:0".to_string(),
                "apps/web/hooks.ts:openStream:5:0".to_string()
            ),
            (
                "scripts/fixit.py:run:1:0".to_string(),
                "apps/api/services.py:collect:5:0".to_string()
            ),
        ]
    );
}

#[test]
fn test_cli_output_is_deterministic() {
    let repo = sample_repo();
    let first = arbor(repo.path(), &["analyze"]);
    let second = arbor(repo.path(), &["analyze"]);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_cli_respects_config_file() {
    let repo = sample_repo();
    fs::write(
        repo.path().join(".arbor.toml"),
        "source_dirs = [\"apps\"]\nexclude = [\"**/*.ts\"]\n",
    )
    .unwrap();

    let payload = stdout_json(&arbor(repo.path(), &["analyze"]));
    let files: Vec<_> = payload["symbols"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["filePath"].as_str().unwrap())
        .collect();
    assert!(files.iter().all(|f| f.starts_with("apps/api/")));
    assert_eq!(files.len(), 3);
}

#[test]
fn test_cli_rejects_malformed_config() {
    let repo = sample_repo();
    let config = repo.path().join("custom.toml");
    fs::write(&config, "snippet_context_lines = \"wide\"\n").unwrap();

    let output = arbor(repo.path(), &["--config", config.to_str().unwrap(), "analyze"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

#[test]
fn test_cli_writes_output_file() {
    let repo = sample_repo();
    let out = repo.path().join("graph.json");

    let output = arbor(repo.path(), &["analyze", "--pretty", "--output", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["symbols"].as_array().unwrap().len(), 6);
    assert_eq!(written["edges"].as_array().unwrap().len(), 4);
}

#[test]
fn test_cli_scan_single_file() {
    let repo = sample_repo();
    let file = repo.path().join("apps/web/hooks.ts");

    let output = Command::new(env!("CARGO_BIN_EXE_arbor"))
        .args(["scan", file.to_str().unwrap()])
        .output()
        .unwrap();
    let drafts = stdout_json(&output);

    let drafts = drafts.as_array().unwrap();
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0]["name"], "useStream");
    assert_eq!(drafts[0]["references"], serde_json::json!(["fetch", "openStream"]));
    assert_eq!(drafts[1]["references"], serde_json::json!(["fetch"]));
}

#[test]
fn test_cli_scan_unsupported_file() {
    let repo = create_repo(&[("notes.md", "# notes\n")]);
    let output = Command::new(env!("CARGO_BIN_EXE_arbor"))
        .args(["scan", repo.path().join("notes.md").to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported file type"));
}

/// Test end-to-end indexing through the library
#[test]
fn test_end_to_end_indexing() {
    use arbor_indexer::{AnalyzerConfig, Coordinator};
    use std::sync::Arc;

    let repo = sample_repo();
    let cache = Arc::new(arbor_core::GraphCache::new());
    let coordinator =
        Coordinator::with_cache(repo.path(), AnalyzerConfig::default(), Arc::clone(&cache)).unwrap();

    let graph = coordinator.analyze();
    assert_eq!(graph.symbol_count(), 6);

    let collect = graph.symbols_named("collect").next().unwrap();
    let callers: Vec<_> = graph
        .edges_to(&collect.id)
        .map(|e| e.source_id.as_str())
        .collect();
    insta::assert_snapshot!(callers.join("\n"), @r"
    apps/api/services.py:analyse_repository:1:0
    scripts/fixit.py:run:1:0
    ");

    // The cached graph survives file changes until invalidated
    fs::remove_file(repo.path().join("scripts/fixit.py")).unwrap();
    assert!(Arc::ptr_eq(&graph, &coordinator.analyze()));

    cache.invalidate();
    assert_eq!(coordinator.analyze().symbol_count(), 5);
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_arbor"))
        .arg("version")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
