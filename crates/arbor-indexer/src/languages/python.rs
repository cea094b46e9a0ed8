//! Python scanner using tree-sitter

use crate::extractor::{ScanLanguage, ScanOptions, SymbolScanner};
use crate::snippet::{extract_snippet, normalize_line_endings};
use arbor_core::{SymbolDraft, SymbolKind};
use tree_sitter::{Node, Parser};

/// Scans Python sources from their parse tree.
///
/// Functions (sync and async) and classes become symbols. A call whose callee
/// is a bare identifier is attributed to the innermost enclosing symbol;
/// calls outside any symbol are ignored. Files with syntax errors yield
/// nothing, including Python 2 statements and inconsistent indentation that
/// the grammar tolerates but the interpreter rejects.
pub struct PythonScanner {
    options: ScanOptions,
}

impl PythonScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }
}

impl Default for PythonScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

/// Per-file state threaded through the visit.
struct ScanContext<'s> {
    file_path: &'s str,
    source: &'s str,
    context_lines: usize,
    drafts: Vec<SymbolDraft>,
}

impl SymbolScanner for PythonScanner {
    fn language(&self) -> ScanLanguage {
        ScanLanguage::Python
    }

    fn scan(&self, file_path: &str, source: &str) -> Vec<SymbolDraft> {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&language) {
            tracing::error!("Failed to load Python grammar: {}", e);
            return Vec::new();
        }

        let source = normalize_line_endings(source);
        let Some(tree) = parser.parse(source.as_bytes(), None) else {
            tracing::warn!(file = file_path, "Parser returned no tree");
            return Vec::new();
        };

        let root = tree.root_node();
        if root.has_error() || !is_valid_python3(root) {
            tracing::debug!(file = file_path, "Skipping file with syntax errors");
            return Vec::new();
        }

        let mut cx = ScanContext {
            file_path,
            source: &source,
            context_lines: self.options.context_lines,
            drafts: Vec::new(),
        };
        visit_node(root, None, &mut cx);
        cx.drafts
    }
}

/// `current` is the index in `cx.drafts` of the innermost enclosing symbol.
fn visit_node(node: Node, current: Option<usize>, cx: &mut ScanContext<'_>) {
    match node.kind() {
        "function_definition" | "class_definition" => {
            let inner = open_symbol(node, cx).or(current);
            visit_children(node, inner, cx);
        }
        "decorated_definition" => {
            // Decorators are attributed to the symbol they decorate.
            let Some(definition) = node.child_by_field_name("definition") else {
                visit_children(node, current, cx);
                return;
            };
            let inner = open_symbol(definition, cx).or(current);
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.id() == definition.id() {
                    visit_children(definition, inner, cx);
                } else {
                    visit_node(child, inner, cx);
                }
            }
        }
        "call" => {
            if let Some(index) = current {
                record_call(node, index, cx);
            }
            visit_children(node, current, cx);
        }
        _ => visit_children(node, current, cx),
    }
}

fn visit_children(node: Node, current: Option<usize>, cx: &mut ScanContext<'_>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_node(child, current, cx);
    }
}

/// Push a draft for a function or class definition and return its index.
fn open_symbol(node: Node, cx: &mut ScanContext<'_>) -> Option<usize> {
    let kind = match node.kind() {
        "function_definition" => SymbolKind::Function,
        "class_definition" => SymbolKind::Class,
        _ => return None,
    };
    let source = cx.source;
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?;

    let position = node.start_position();
    let line = position.row + 1;
    let snippet = extract_snippet(source, line, cx.context_lines);
    cx.drafts.push(SymbolDraft::new(
        cx.file_path,
        name,
        kind,
        line,
        position.column,
        snippet.text,
        snippet.start_line,
    ));
    Some(cx.drafts.len() - 1)
}

fn record_call(node: Node, index: usize, cx: &mut ScanContext<'_>) {
    let Some(callee) = node.child_by_field_name("function") else {
        return;
    };
    if callee.kind() != "identifier" {
        return;
    }
    let source = cx.source;
    if let Ok(name) = callee.utf8_text(source.as_bytes()) {
        cx.drafts[index].references.insert(name.to_string());
    }
}

/// Statements only Python 2 accepts.
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Checks the parse tree for constructs the grammar accepts without an
/// error node but the interpreter refuses: Python 2 statements, and
/// statements that do not line up with the rest of their block.
fn is_valid_python3(root: Node) -> bool {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if PYTHON2_STATEMENTS.contains(&node.kind()) {
            return false;
        }
        match node.kind() {
            "module" if !statements_aligned(node, Some(0)) => return false,
            "block" if !statements_aligned(node, None) => return false,
            _ => {}
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    true
}

/// Every statement that begins a line must start at the same column:
/// `expected`, or the column of the first statement when `None`.
fn statements_aligned(node: Node, expected: Option<usize>) -> bool {
    let mut column = expected;
    let mut previous_end_row = None;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        let start = child.start_position();
        let begins_line = previous_end_row.is_none_or(|row| start.row > row);
        previous_end_row = Some(child.end_position().row);
        if !begins_line {
            continue;
        }
        match column {
            Some(column) if column != start.column => return false,
            Some(_) => {}
            None => column = Some(start.column),
        }
    }
    true
}
