//! Test utilities for Arbor

use tempfile::TempDir;
use std::fs;

/// Create a temporary repository with a small mixed Python/TypeScript tree
pub fn create_test_repo() -> TempDir {
    create_repo_with_structure(&[
        ("apps/api/main.py", r#"
from services import analysis

def create_app():
    app = build_router()
    register(app)
    return app

def build_router():
    return Router()

class Router:
    def register(self, route):
        validate(route)

def validate(route):
    return route is not None
"#),
        ("apps/api/broken.py", r#"
def broken(:
    pass
"#),
        ("apps/web/lib/sse.ts", r#"
export function parseEvent(raw: string) {
    const lines = splitLines(raw);
    return lines;
}

function splitLines(raw: string) {
    return raw.split("\n");
}
"#),
        ("apps/web/node_modules/pkg/index.ts", r#"
export function vendored() {}
"#),
        ("packages/shared/index.ts", r#"
export class EventBus {
    emit(name: string) {
        validate(name);
    }
}
"#),
    ])
}

/// Create a repository with a specific file structure
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        // Create parent directories if needed
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_repo() {
        let temp_dir = create_test_repo();
        let root = temp_dir.path();

        assert!(root.join("apps/api/main.py").exists());
        assert!(root.join("apps/web/lib/sse.ts").exists());
        assert!(root.join("packages/shared/index.ts").exists());
    }
}
