//! Char-column helpers for single lines.
//!
//! Every function takes columns in chars and returns byte-correct slices.
//! A column past the end of the line is a caller bug and panics.

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of char column `col` in `s`; `col == char_len(s)` maps to `s.len()`.
pub fn byte_offset(s: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    match s.char_indices().nth(col) {
        Some((byte, _)) => byte,
        None => {
            let len = char_len(s);
            assert!(col == len, "column {col} out of bounds for line of {len} chars");
            s.len()
        }
    }
}

/// Split `s` at char column `col`.
pub fn split_at_col(s: &str, col: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, col))
}

/// Slice `s` between char columns `[start, end)`.
pub fn slice_cols(s: &str, start: usize, end: usize) -> &str {
    debug_assert!(start <= end);
    let a = byte_offset(s, start);
    let b = byte_offset(s, end);
    &s[a..b]
}

/// Remove chars `[start, end)` from `line` in place, returning them.
pub fn remove_cols(line: &mut String, start: usize, end: usize) -> String {
    let a = byte_offset(line, start);
    let b = byte_offset(line, end);
    line.drain(a..b).collect()
}

/// Insert `text` into `line` at char column `col`.
pub fn insert_at_col(line: &mut String, col: usize, text: &str) {
    let at = byte_offset(line, col);
    line.insert_str(at, text);
}
