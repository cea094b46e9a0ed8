//! Source windows around declarations

use std::borrow::Cow;

/// A contiguous run of source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub text: String,
    /// 1-indexed line number of the first line in `text`.
    pub start_line: usize,
}

/// Up to `2 * context + 1` lines centered on the 1-indexed `center_line`,
/// clipped to the bounds of the file.
///
/// A source with no lines is returned as is, starting at line 1.
pub fn extract_snippet(source: &str, center_line: usize, context: usize) -> Snippet {
    let lines: Vec<&str> = source.lines().collect();
    if lines.is_empty() {
        return Snippet {
            text: source.to_string(),
            start_line: 1,
        };
    }

    let center = center_line.saturating_sub(1);
    let start = center.saturating_sub(context);
    let end = lines.len().min(center + context + 1);
    let text = if start < end {
        lines[start..end].join("\n")
    } else {
        String::new()
    };

    Snippet {
        text,
        start_line: start + 1,
    }
}

/// Rewrite `\r\n` and lone `\r` line breaks as `\n`.
///
/// Borrows when the source already uses `\n` only.
pub fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    if !source.contains('\r') {
        return Cow::Borrowed(source);
    }
    Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
}
