//! Editing core: line buffer model, reversible edit actions, undo manager and
//! clipboard stack.
//!
//! `TextBufferModel` owns the line array, the cursor and the optional
//! selection. Every mutating operation returns the `EditAction` able to undo
//! and redo it (or `None` when the operation was a no-op); the caller pushes
//! that action onto an `UndoManager`. The model never talks to the manager
//! itself, so its mutation API stays the single description of both the edit
//! and its inverse.
//!
//! Invariants (hold after every public call):
//! * `lines` is never empty; the empty document is `[""]`.
//! * `cursor.row < lines.len()` and `cursor.col <= chars(lines[cursor.row])`.
//! * `selection`, when present, is non-empty and both endpoints are valid.
//! * Any buffer mutation clears the selection, except the inversion of a
//!   range delete, which puts back the selection that existed before it.
//!
//! Locations that do not fit the buffer indicate an undo/redo ordering bug
//! and abort through `assert!`.
//!
//! Notifications go out synchronously on the model's `EventBus`:
//! `TextChanged` after each content change, `CursorMoved` only when the
//! cursor value changed and `SelectionChanged` only when the selection value
//! changed. Edge moves (left at the document start, right at its end) are
//! therefore silent.

use core_events::{EditorEvent, EventBus, EventKinds, SubscriptionId};
use core_text::{Location, LocationRange, column, normalize_line_endings};
use tracing::{debug, trace, warn};

pub mod action;
pub mod clipboard;
pub mod undo;

pub use action::EditAction;
pub use clipboard::{ClipboardError, ClipboardStack};
pub use undo::UndoManager;

/// Comparable copy of the observable model state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub lines: Vec<String>,
    pub cursor: Location,
    pub selection: Option<LocationRange>,
}

#[derive(Debug)]
pub struct TextBufferModel {
    lines: Vec<String>,
    cursor: Location,
    selection: Option<LocationRange>,
    events: EventBus,
}

impl Default for TextBufferModel {
    fn default() -> Self {
        Self::from_lines(Vec::new())
    }
}

type Step = fn(&TextBufferModel, Location) -> Location;

impl TextBufferModel {
    /// Build a model from raw text; every line break starts a new line.
    pub fn new(text: &str) -> Self {
        Self::from_lines(
            normalize_line_endings(text)
                .split('\n')
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines: sanitize_lines(lines),
            cursor: Location::origin(),
            selection: None,
            events: EventBus::new(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Char length of `row`, 0 for rows past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| column::char_len(l))
    }

    /// Whole document joined with `\n`.
    pub fn text(&self) -> String {
        core_text::join_lines(&self.lines)
    }

    pub fn cursor(&self) -> Location {
        self.cursor
    }

    pub fn selection(&self) -> Option<LocationRange> {
        self.selection
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection.map(|range| self.text_in(range))
    }

    pub fn is_valid_location(&self, loc: Location) -> bool {
        loc.row < self.lines.len() && loc.col <= self.line_len(loc.row)
    }

    /// Location after the last char of the last line.
    pub fn document_end(&self) -> Location {
        let row = self.lines.len() - 1;
        Location::new(row, self.line_len(row))
    }

    /// Text between the normalized endpoints of `range`, lines joined with `\n`.
    pub fn text_in(&self, range: LocationRange) -> String {
        let (start, end) = range.normalized();
        self.assert_location(start);
        self.assert_location(end);
        if start.row == end.row {
            return column::slice_cols(&self.lines[start.row], start.col, end.col).to_owned();
        }
        let mut out = column::split_at_col(&self.lines[start.row], start.col)
            .1
            .to_owned();
        for row in start.row + 1..end.row {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        out.push_str(column::split_at_col(&self.lines[end.row], end.col).0);
        out
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, kinds: EventKinds, callback: F) -> SubscriptionId
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.events.subscribe(kinds, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Cursor & selection
    // ------------------------------------------------------------------

    pub fn set_cursor(&mut self, loc: Location) {
        self.assert_location(loc);
        self.place_cursor(loc);
    }

    /// Replace the selection. A zero-width range is stored as `None`.
    pub fn set_selection(&mut self, selection: Option<LocationRange>) {
        if let Some(range) = selection {
            self.assert_location(range.start);
            self.assert_location(range.end);
        }
        self.replace_selection(selection);
    }

    pub fn move_cursor_left(&mut self, clear_selection: bool) -> bool {
        self.move_with(Self::step_left, clear_selection)
    }

    pub fn move_cursor_right(&mut self, clear_selection: bool) -> bool {
        self.move_with(Self::step_right, clear_selection)
    }

    pub fn move_cursor_up(&mut self, clear_selection: bool) -> bool {
        self.move_with(Self::step_up, clear_selection)
    }

    pub fn move_cursor_down(&mut self, clear_selection: bool) -> bool {
        self.move_with(Self::step_down, clear_selection)
    }

    pub fn move_cursor_start(&mut self) {
        self.replace_selection(None);
        self.place_cursor(Location::origin());
    }

    pub fn move_cursor_end(&mut self) {
        self.replace_selection(None);
        let end = self.document_end();
        self.place_cursor(end);
    }

    pub fn select_left(&mut self) {
        self.select_with(Self::step_left);
    }

    pub fn select_right(&mut self) {
        self.select_with(Self::step_right);
    }

    pub fn select_up(&mut self) {
        self.select_with(Self::step_up);
    }

    pub fn select_down(&mut self) {
        self.select_with(Self::step_down);
    }

    /// Select the whole document, anchored at the origin.
    pub fn select_all(&mut self) {
        let end = self.document_end();
        self.place_cursor(end);
        self.replace_selection(Some(LocationRange::new(Location::origin(), end)));
    }

    fn step_left(&self, loc: Location) -> Location {
        if loc.col > 0 {
            Location::new(loc.row, loc.col - 1)
        } else if loc.row > 0 {
            Location::new(loc.row - 1, self.line_len(loc.row - 1))
        } else {
            loc
        }
    }

    fn step_right(&self, loc: Location) -> Location {
        if loc.col < self.line_len(loc.row) {
            Location::new(loc.row, loc.col + 1)
        } else if loc.row + 1 < self.lines.len() {
            Location::new(loc.row + 1, 0)
        } else {
            loc
        }
    }

    fn step_up(&self, loc: Location) -> Location {
        if loc.row == 0 {
            return loc;
        }
        let row = loc.row - 1;
        Location::new(row, loc.col.min(self.line_len(row)))
    }

    fn step_down(&self, loc: Location) -> Location {
        if loc.row + 1 >= self.lines.len() {
            return loc;
        }
        let row = loc.row + 1;
        Location::new(row, loc.col.min(self.line_len(row)))
    }

    fn move_with(&mut self, step: Step, clear_selection: bool) -> bool {
        if clear_selection {
            self.replace_selection(None);
        }
        let next = step(self, self.cursor);
        let moved = next != self.cursor;
        self.place_cursor(next);
        moved
    }

    fn select_with(&mut self, step: Step) {
        let anchor = self.selection.map_or(self.cursor, |range| range.start);
        let next = step(self, self.cursor);
        self.place_cursor(next);
        self.replace_selection(Some(LocationRange::new(anchor, next)));
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert `text` at the cursor, replacing the selection when one is active.
    ///
    /// `\r\n` and lone `\r` count as line breaks. Empty text and text holding
    /// control characters other than `\n` and `\t`, or Unicode separators
    /// other than the space, insert nothing.
    pub fn insert(&mut self, text: &str) -> Option<EditAction> {
        let text = normalize_line_endings(text);
        if text.is_empty() {
            return None;
        }
        if !is_insertable(&text) {
            trace!(target: "state.model", len = text.len(), "insert_rejected_control_chars");
            return None;
        }
        let removal = match self.selection {
            Some(range) => self.delete_range(range),
            None => None,
        };
        let at = self.cursor;
        self.splice_in(at, &text);
        let inserted = if text == "\n" {
            EditAction::InsertNewline { at }
        } else if text.contains('\n') {
            EditAction::InsertMultiline { text, at }
        } else {
            EditAction::InsertChar { text, at }
        };
        debug!(target: "state.model", kind = inserted.kind(), row = at.row, col = at.col, replaced_selection = removal.is_some(), "insert");
        EditAction::combine(removal, Some(inserted))
    }

    /// Backspace. With `Some(at)` the cursor is first placed at `at`; undo
    /// returns it to where it stood before the call.
    pub fn delete_before(&mut self, at: Option<Location>) -> Option<EditAction> {
        if let Some(range) = self.selection {
            return self.delete_range(range);
        }
        let cursor_before = self.cursor;
        if let Some(loc) = at {
            self.set_cursor(loc);
        }
        let cursor = self.cursor;
        let action = if cursor.col > 0 {
            let start = Location::new(cursor.row, cursor.col - 1);
            let text = self.cut_out(start, cursor);
            EditAction::DeleteBeforeChar {
                text,
                at: start,
                cursor_before,
            }
        } else if cursor.row > 0 {
            let join = Location::new(cursor.row - 1, self.line_len(cursor.row - 1));
            self.cut_out(join, cursor);
            EditAction::DeleteBeforeNewline {
                at: join,
                cursor_before,
            }
        } else {
            return None;
        };
        debug!(target: "state.model", kind = action.kind(), row = cursor.row, col = cursor.col, "delete_before");
        Some(action)
    }

    /// Forward delete. With `Some(at)` the cursor is first placed at `at`; undo
    /// returns it to where it stood before the call.
    pub fn delete_after(&mut self, at: Option<Location>) -> Option<EditAction> {
        if let Some(range) = self.selection {
            return self.delete_range(range);
        }
        let cursor_before = self.cursor;
        if let Some(loc) = at {
            self.set_cursor(loc);
        }
        let cursor = self.cursor;
        let action = if cursor.col < self.line_len(cursor.row) {
            let text = self.cut_out(cursor, Location::new(cursor.row, cursor.col + 1));
            EditAction::DeleteAfterChar {
                text,
                at: cursor,
                cursor_before,
            }
        } else if cursor.row + 1 < self.lines.len() {
            self.cut_out(cursor, Location::new(cursor.row + 1, 0));
            EditAction::DeleteAfterNewline {
                at: cursor,
                cursor_before,
            }
        } else {
            return None;
        };
        debug!(target: "state.model", kind = action.kind(), row = cursor.row, col = cursor.col, "delete_after");
        Some(action)
    }

    /// Remove everything between the normalized endpoints of `range`.
    pub fn delete_range(&mut self, range: LocationRange) -> Option<EditAction> {
        let (start, end) = range.normalized();
        self.assert_location(start);
        self.assert_location(end);
        if start == end {
            return None;
        }
        let cursor_before = self.cursor;
        let selection_before = self.selection;
        let text = self.cut_out(start, end);
        debug!(target: "state.model", %range, removed_chars = column::char_len(&text), "delete_range");
        Some(EditAction::DeleteRange {
            text,
            range,
            cursor_before,
            selection_before,
        })
    }

    /// Push the selected text onto `clipboard`. Returns whether anything was copied.
    pub fn copy(&self, clipboard: &mut ClipboardStack) -> bool {
        match self.selected_text() {
            Some(text) => {
                clipboard.push(text);
                true
            }
            None => false,
        }
    }

    pub fn cut(&mut self, clipboard: &mut ClipboardStack) -> Option<EditAction> {
        let range = self.selection?;
        clipboard.push(self.text_in(range));
        self.delete_range(range)
    }

    /// Insert the clipboard top, leaving it on the stack.
    pub fn paste(&mut self, clipboard: &ClipboardStack) -> Option<EditAction> {
        match clipboard.peek() {
            Ok(text) => {
                let text = text.to_owned();
                self.insert(&text)
            }
            Err(e) => {
                warn!(target: "state.model", error = %e, "paste_skipped");
                None
            }
        }
    }

    /// Insert the clipboard top and remove it from the stack.
    pub fn paste_and_take(&mut self, clipboard: &mut ClipboardStack) -> Option<EditAction> {
        match clipboard.pop() {
            Ok(text) => self.insert(&text),
            Err(e) => {
                warn!(target: "state.model", error = %e, "paste_and_take_skipped");
                None
            }
        }
    }

    /// Delete the whole document.
    pub fn clear(&mut self) -> Option<EditAction> {
        let end = self.document_end();
        if end == Location::origin() {
            return None;
        }
        self.delete_range(LocationRange::new(Location::origin(), end))
    }

    /// Replace the buffer wholesale (file load). Not undoable.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = sanitize_lines(lines);
        self.replace_selection(None);
        self.place_cursor(Location::origin());
        self.events.emit(EditorEvent::TextChanged);
        debug!(target: "state.model", lines = self.lines.len(), "set_lines");
    }

    // ------------------------------------------------------------------
    // Primitives shared with `EditAction`
    // ------------------------------------------------------------------

    /// Splice `text` in at `at`, cursor after it. Returns the end location.
    /// The selection is dropped once the lines hold the new text, so every
    /// notification sees the edited buffer.
    pub(crate) fn splice_in(&mut self, at: Location, text: &str) -> Location {
        self.assert_location(at);
        if text.contains('\n') {
            let line = &mut self.lines[at.row];
            let split = column::byte_offset(line, at.col);
            let tail = line.split_off(split);
            let mut segments = text.split('\n');
            if let Some(first) = segments.next() {
                line.push_str(first);
            }
            let mut introduced: Vec<String> = segments.map(str::to_owned).collect();
            if let Some(last) = introduced.last_mut() {
                last.push_str(&tail);
            }
            self.lines.splice(at.row + 1..at.row + 1, introduced);
        } else {
            column::insert_at_col(&mut self.lines[at.row], at.col, text);
        }
        let end = at.advanced_by(text);
        self.replace_selection(None);
        self.events.emit(EditorEvent::TextChanged);
        self.place_cursor(end);
        end
    }

    /// Remove `[start, end)` (caller passes ordered endpoints), cursor to `start`.
    /// Returns the removed text with line breaks as `\n`.
    pub(crate) fn cut_out(&mut self, start: Location, end: Location) -> String {
        self.assert_location(start);
        self.assert_location(end);
        assert!(start <= end, "cut_out endpoints out of order: {start} > {end}");
        let removed = if start.row == end.row {
            column::remove_cols(&mut self.lines[start.row], start.col, end.col)
        } else {
            let mut drained: Vec<String> = self.lines.drain(start.row + 1..=end.row).collect();
            let last = drained.pop().unwrap_or_default();
            let (last_head, last_tail) = column::split_at_col(&last, end.col);
            let first = &mut self.lines[start.row];
            let split = column::byte_offset(first, start.col);
            let mut removed = first.split_off(split);
            first.push_str(last_tail);
            for middle in drained {
                removed.push('\n');
                removed.push_str(&middle);
            }
            removed.push('\n');
            removed.push_str(last_head);
            removed
        };
        self.replace_selection(None);
        self.events.emit(EditorEvent::TextChanged);
        self.place_cursor(start);
        removed
    }

    fn place_cursor(&mut self, loc: Location) {
        if self.cursor != loc {
            self.cursor = loc;
            self.events.emit(EditorEvent::CursorMoved(loc));
        }
    }

    fn replace_selection(&mut self, selection: Option<LocationRange>) {
        let selection = selection.filter(|range| !range.is_empty());
        if self.selection != selection {
            self.selection = selection;
            self.events.emit(EditorEvent::SelectionChanged {
                active: selection.is_some(),
            });
        }
    }

    fn assert_location(&self, loc: Location) {
        assert!(
            self.is_valid_location(loc),
            "location {loc} outside buffer of {} lines",
            self.lines.len()
        );
    }
}

/// Printable text plus `\n` and `\t`. Control characters and the Unicode
/// separators other than the ASCII space (U+00A0, U+2028, ...) are refused.
fn is_insertable(text: &str) -> bool {
    text.chars().all(|c| match c {
        '\n' | '\t' | ' ' => true,
        c => !c.is_control() && !c.is_whitespace(),
    })
}

/// Enforce the line-array invariants: no embedded terminators, at least one line.
fn sanitize_lines(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len().max(1));
    for line in lines {
        if line.contains(['\n', '\r']) {
            out.extend(normalize_line_endings(&line).split('\n').map(str::to_owned));
        } else {
            out.push(line);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
