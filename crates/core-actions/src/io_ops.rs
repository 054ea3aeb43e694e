//! File IO helpers used by the session.
//!
//! Reading normalizes every line ending to `\n` and drops one trailing
//! terminator, so `"a\r\nb\n"` loads as `["a", "b"]`. Writing joins lines with
//! `\n` and appends no terminator.

use anyhow::{Context, Result};
use core_text::{join_lines, split_lines};
use std::{fs, path::Path};
use tracing::{debug, error};

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .inspect_err(|e| error!(target: "io", path = %path.display(), error = %e, "file_open_error"))
        .with_context(|| format!("failed to read {}", path.display()))?;
    let lines = split_lines(&content);
    debug!(target: "io", path = %path.display(), lines = lines.len(), bytes = content.len(), "file_read");
    Ok(lines)
}

pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let content = join_lines(lines);
    fs::write(path, content.as_bytes())
        .inspect_err(|e| error!(target: "io", path = %path.display(), error = %e, "file_write_error"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(target: "io", path = %path.display(), lines = lines.len(), bytes = content.len(), "file_written");
    Ok(())
}
