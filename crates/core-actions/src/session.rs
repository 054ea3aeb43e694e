//! One editing session: the buffer model plus the undo history, clipboard
//! and plugins that operate on it, and the file it is bound to.
//!
//! The session is the only owner of its `UndoManager`; nothing else keeps a
//! history for the same model. `dirty` tracks unsaved content changes and is
//! driven by the model's `TextChanged` notifications, so undo, redo and
//! plugin edits count as well as direct edits.

use crate::io_ops;
use anyhow::{Context, Result, bail};
use core_config::Config;
use core_events::EventKinds;
use core_plugin::PluginRegistry;
use core_state::{ClipboardStack, EditAction, TextBufferModel, UndoManager};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

#[derive(Debug)]
pub struct EditorSession {
    /// Not to be replaced wholesale: the session observes this instance.
    pub model: TextBufferModel,
    pub undo: UndoManager,
    pub clipboard: ClipboardStack,
    pub plugins: PluginRegistry,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    revision: Rc<Cell<u64>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl EditorSession {
    pub fn new(config: &Config) -> Self {
        let mut plugins = PluginRegistry::with_builtins();
        if let Some(enabled) = config.enabled_plugins() {
            plugins.retain_enabled(enabled);
        }
        let mut model = TextBufferModel::default();
        let revision = Rc::new(Cell::new(0u64));
        let counter = revision.clone();
        model.subscribe(EventKinds::TEXT, move |_| counter.set(counter.get() + 1));
        Self {
            model,
            undo: UndoManager::new(),
            clipboard: ClipboardStack::with_capacity_limit(config.clipboard_capacity()),
            plugins,
            file_name: None,
            dirty: false,
            revision,
        }
    }

    /// Count of content changes since creation; compare two readings to
    /// learn whether anything in between touched the text.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Push `action` as a fresh edit. Returns whether one was recorded.
    pub fn record(&mut self, action: Option<EditAction>) -> bool {
        let pushed = self.undo.push(action);
        if pushed {
            self.dirty = true;
        }
        pushed
    }

    /// Load `path` into the buffer, forgetting the previous history.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let lines = io_ops::read_lines(path)?;
        self.model.set_lines(lines);
        self.undo.reset();
        self.file_name = Some(path.to_path_buf());
        self.dirty = false;
        info!(target: "io", path = %path.display(), lines = self.model.line_count(), "file_opened");
        Ok(())
    }

    /// Write the buffer to `target`, or to the bound file name. A successful
    /// write to `target` rebinds the session to it.
    pub fn write(&mut self, target: Option<&Path>) -> Result<PathBuf> {
        let path = match (target, &self.file_name) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(existing)) => existing.clone(),
            (None, None) => bail!("no file name"),
        };
        io_ops::write_lines(&path, self.model.lines())
            .with_context(|| "write aborted, buffer left dirty")?;
        self.file_name = Some(path.clone());
        self.dirty = false;
        info!(target: "io", path = %path.display(), "file_saved");
        Ok(path)
    }

    /// File name, dirty marker, line and cursor position in one line.
    pub fn status_line(&self) -> String {
        let name = self
            .file_name
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let marker = if self.dirty { " [+]" } else { "" };
        let cursor = self.model.cursor();
        format!(
            "{name}{marker} | Lines:[{}/{}] | Cursor:[{}:{}]",
            cursor.row + 1,
            self.model.line_count(),
            cursor.row,
            cursor.col
        )
    }
}
