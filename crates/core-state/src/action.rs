//! Reversible edit actions.
//!
//! Each variant stores only what it needs to redo and undo itself; the model
//! it applies to is passed in by the caller (normally `UndoManager`). Actions
//! are applied and inverted strictly in stack order, so every variant may
//! assume the buffer is exactly in the state its previous execution left.
//!
//! Cursor contract: `apply` leaves the cursor where the original edit left
//! it, `invert` puts it back where it stood before the edit. Deletes record
//! that location in `cursor_before`, since a delete given an explicit
//! location may start away from the cursor.

use crate::TextBufferModel;
use core_text::{Location, LocationRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// `text` (no line breaks) inserted at `at`.
    InsertChar { text: String, at: Location },
    /// Line split at `at`.
    InsertNewline { at: Location },
    /// `text` with at least one line break spliced in at `at`.
    InsertMultiline { text: String, at: Location },
    /// Backspace removed `text` which sat at `at`; cursor ended on `at`.
    DeleteBeforeChar {
        text: String,
        at: Location,
        cursor_before: Location,
    },
    /// Forward delete removed `text` at `at`.
    DeleteAfterChar {
        text: String,
        at: Location,
        cursor_before: Location,
    },
    /// Backspace at a line start joined it onto the line above; `at` is the join point.
    DeleteBeforeNewline { at: Location, cursor_before: Location },
    /// Forward delete at a line end joined the next line; `at` is the join point.
    DeleteAfterNewline { at: Location, cursor_before: Location },
    /// Bulk removal of `range` (stored as given, normalized on use).
    DeleteRange {
        text: String,
        range: LocationRange,
        cursor_before: Location,
        selection_before: Option<LocationRange>,
    },
    /// Ordered group; undone in reverse.
    Compound(Vec<EditAction>),
}

impl EditAction {
    /// Group two optional actions: both present → `Compound([first, second])`,
    /// otherwise whichever one exists.
    pub fn combine(first: Option<EditAction>, second: Option<EditAction>) -> Option<EditAction> {
        match (first, second) {
            (Some(a), Some(b)) => Some(EditAction::Compound(vec![a, b])),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EditAction::InsertChar { .. } => "insert_char",
            EditAction::InsertNewline { .. } => "insert_newline",
            EditAction::InsertMultiline { .. } => "insert_multiline",
            EditAction::DeleteBeforeChar { .. } => "delete_before_char",
            EditAction::DeleteAfterChar { .. } => "delete_after_char",
            EditAction::DeleteBeforeNewline { .. } => "delete_before_newline",
            EditAction::DeleteAfterNewline { .. } => "delete_after_newline",
            EditAction::DeleteRange { .. } => "delete_range",
            EditAction::Compound(_) => "compound",
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, EditAction::Compound(_))
    }

    /// Re-perform the edit.
    pub fn apply(&self, model: &mut TextBufferModel) {
        match self {
            EditAction::InsertChar { text, at } | EditAction::InsertMultiline { text, at } => {
                model.splice_in(*at, text);
            }
            EditAction::InsertNewline { at } => {
                model.splice_in(*at, "\n");
            }
            EditAction::DeleteBeforeChar { text, at, .. }
            | EditAction::DeleteAfterChar { text, at, .. } => {
                let removed = model.cut_out(*at, at.advanced_by(text));
                debug_assert_eq!(&removed, text);
            }
            EditAction::DeleteBeforeNewline { at, .. } | EditAction::DeleteAfterNewline { at, .. } => {
                model.cut_out(*at, next_line_start(*at));
            }
            EditAction::DeleteRange { text, range, .. } => {
                let (start, end) = range.normalized();
                let removed = model.cut_out(start, end);
                debug_assert_eq!(&removed, text);
            }
            EditAction::Compound(actions) => {
                for action in actions {
                    action.apply(model);
                }
            }
        }
    }

    /// Undo the edit, restoring the pre-edit cursor (and selection for range deletes).
    pub fn invert(&self, model: &mut TextBufferModel) {
        match self {
            EditAction::InsertChar { text, at } | EditAction::InsertMultiline { text, at } => {
                let removed = model.cut_out(*at, at.advanced_by(text));
                debug_assert_eq!(&removed, text);
            }
            EditAction::InsertNewline { at } => {
                model.cut_out(*at, next_line_start(*at));
            }
            EditAction::DeleteBeforeChar {
                text,
                at,
                cursor_before,
            }
            | EditAction::DeleteAfterChar {
                text,
                at,
                cursor_before,
            } => {
                model.splice_in(*at, text);
                model.set_cursor(*cursor_before);
            }
            EditAction::DeleteBeforeNewline { at, cursor_before }
            | EditAction::DeleteAfterNewline { at, cursor_before } => {
                model.splice_in(*at, "\n");
                model.set_cursor(*cursor_before);
            }
            EditAction::DeleteRange {
                text,
                range,
                cursor_before,
                selection_before,
            } => {
                let (start, _) = range.normalized();
                model.splice_in(start, text);
                model.set_cursor(*cursor_before);
                model.set_selection(*selection_before);
            }
            EditAction::Compound(actions) => {
                for action in actions.iter().rev() {
                    action.invert(model);
                }
            }
        }
    }
}

fn next_line_start(at: Location) -> Location {
    Location::new(at.row + 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loc(row: usize, col: usize) -> Location {
        Location::new(row, col)
    }

    fn model_at(lines: &[&str], cursor: Location) -> TextBufferModel {
        let mut m = TextBufferModel::from_lines(lines.iter().map(|s| s.to_string()).collect());
        m.set_cursor(cursor);
        m
    }

    /// Run `op`, invert, check the pre-state; apply, check the post-state.
    fn assert_round_trip<F>(lines: &[&str], cursor: Location, op: F)
    where
        F: FnOnce(&mut TextBufferModel) -> Option<EditAction>,
    {
        let mut m = model_at(lines, cursor);
        let before = m.snapshot();
        let action = op(&mut m).expect("operation produced an action");
        let after = m.snapshot();
        action.invert(&mut m);
        assert_eq!(m.snapshot(), before, "invert restores pre-edit state");
        action.apply(&mut m);
        assert_eq!(m.snapshot(), after, "apply restores post-edit state");
    }

    #[test]
    fn combine_keeps_present_side() {
        let a = EditAction::InsertNewline { at: loc(0, 0) };
        assert_eq!(EditAction::combine(Some(a.clone()), None), Some(a.clone()));
        assert_eq!(EditAction::combine(None, Some(a.clone())), Some(a.clone()));
        assert_eq!(EditAction::combine(None, None), None);
        assert!(
            EditAction::combine(Some(a.clone()), Some(a))
                .expect("compound")
                .is_compound()
        );
    }

    #[test]
    fn insert_char_round_trip() {
        assert_round_trip(&["abc"], loc(0, 3), |m| m.insert("d"));
        assert_round_trip(&["abc"], loc(0, 0), |m| m.insert("xyz"));
    }

    #[test]
    fn insert_newline_round_trip() {
        assert_round_trip(&["abcd"], loc(0, 2), |m| m.insert("\n"));
        assert_round_trip(&["abcd", "e"], loc(0, 4), |m| m.insert("\n"));
        assert_round_trip(&[""], loc(0, 0), |m| m.insert("\n"));
    }

    #[test]
    fn insert_multiline_round_trip_at_every_column() {
        for col in 0..=5 {
            assert_round_trip(&["hello", "world"], loc(0, col), |m| m.insert("a\nbb\nccc"));
            assert_round_trip(&["hello", "world"], loc(1, col), |m| m.insert("\n\n"));
            assert_round_trip(&["hello"], loc(0, col), |m| m.insert("x\n"));
            assert_round_trip(&["hello"], loc(0, col), |m| m.insert("\ny"));
        }
    }

    #[test]
    fn delete_before_char_inverse_restores_cursor_after_char() {
        let mut m = model_at(&["abc"], loc(0, 2));
        let action = m.delete_before(None).expect("action");
        assert_eq!(m.cursor(), loc(0, 1));
        action.invert(&mut m);
        assert_eq!(m.lines(), &["abc"]);
        assert_eq!(m.cursor(), loc(0, 2));
    }

    #[test]
    fn delete_after_char_inverse_keeps_cursor() {
        let mut m = model_at(&["abc"], loc(0, 1));
        let action = m.delete_after(None).expect("action");
        assert_eq!(m.lines(), &["ac"]);
        action.invert(&mut m);
        assert_eq!(m.lines(), &["abc"]);
        assert_eq!(m.cursor(), loc(0, 1));
    }

    #[test]
    fn explicit_location_delete_inverse_restores_caller_cursor() {
        for at in [loc(0, 0), loc(0, 2), loc(1, 0)] {
            assert_round_trip(&["ab", "cd"], loc(1, 2), |m| m.delete_after(Some(at)));
        }
        for at in [loc(0, 1), loc(1, 0), loc(1, 2)] {
            assert_round_trip(&["ab", "cd"], loc(0, 0), |m| m.delete_before(Some(at)));
        }
    }

    #[test]
    fn newline_deletes_round_trip() {
        assert_round_trip(&["ab", "cd"], loc(1, 0), |m| m.delete_before(None));
        assert_round_trip(&["ab", "cd"], loc(0, 2), |m| m.delete_after(None));
        assert_round_trip(&["", ""], loc(0, 0), |m| m.delete_after(None));
    }

    #[test]
    fn delete_range_inverse_restores_selection_and_cursor() {
        let mut m = model_at(&["one", "two", "three"], loc(0, 1));
        m.select_down();
        m.select_down();
        m.select_right();
        let selection = m.selection();
        let cursor = m.cursor();
        let action = m.delete_before(None).expect("action");
        assert_eq!(m.lines(), &["oree"]);
        assert_eq!(m.selection(), None);
        action.invert(&mut m);
        assert_eq!(m.lines(), &["one", "two", "three"]);
        assert_eq!(m.selection(), selection);
        assert_eq!(m.cursor(), cursor);
        action.apply(&mut m);
        assert_eq!(m.lines(), &["oree"]);
        assert_eq!(m.selection(), None, "redo clears the selection");
    }

    #[test]
    fn clear_inverse_restores_no_selection() {
        assert_round_trip(&["ab", "cd"], loc(1, 1), |m| m.clear());
    }

    #[test]
    fn compound_inverts_in_reverse_order() {
        let mut m = model_at(&["hello world"], loc(0, 0));
        m.set_selection(Some(LocationRange::new(loc(0, 0), loc(0, 5))));
        let before = m.snapshot();
        let action = m.insert("a\nb").expect("action");
        assert_eq!(m.lines(), &["a", "b world"]);
        let after = m.snapshot();
        action.invert(&mut m);
        assert_eq!(m.snapshot(), before);
        action.apply(&mut m);
        assert_eq!(m.snapshot(), after);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(EditAction::InsertNewline { at: loc(0, 0) }.kind(), "insert_newline");
        assert_eq!(EditAction::Compound(Vec::new()).kind(), "compound");
    }
}
