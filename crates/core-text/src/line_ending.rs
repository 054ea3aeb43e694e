//! Line ending normalization and the line-array view of file content.
//!
//! Buffers never store terminators. Loading normalizes CRLF and lone CR to
//! LF, then splits on LF the way `str::lines` would (a final terminator does
//! not produce an extra empty line). Saving joins with a single LF and writes
//! no trailing terminator.

/// Rewrite CRLF and lone CR as LF.
pub fn normalize_line_endings(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    debug_assert!(!normalized.contains('\r'));
    normalized
}

/// Split file content into terminator-free lines. Always yields at least one line.
pub fn split_lines(content: &str) -> Vec<String> {
    let had_trailing_newline = content.ends_with(['\n', '\r']);
    let mut lines: Vec<String> = normalize_line_endings(content)
        .split('\n')
        .map(str::to_owned)
        .collect();
    if had_trailing_newline && lines.len() > 1 {
        lines.pop();
    }
    lines
}

/// Join lines with a single LF, no trailing terminator.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out
}
