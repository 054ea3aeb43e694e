use crate::{EditAction, TextBufferModel};
use core_events::{EditorEvent, EventBus, EventKinds, SubscriptionId};
use tracing::trace;

/// Undo/redo stacks of `EditAction`.
///
/// One manager per editing session; the session owns it next to the model
/// and passes the model in on every undo/redo. A push after an undo discards
/// the whole redo history. Stacks are unbounded.
#[derive(Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<EditAction>,
    redo_stack: Vec<EditAction>,
    events: EventBus,
}

impl UndoManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn subscribe<F>(&mut self, kinds: EventKinds, callback: F) -> SubscriptionId
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.events.subscribe(kinds, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Record a freshly performed edit. `None` is ignored and returns `false`.
    pub fn push(&mut self, action: Option<EditAction>) -> bool {
        let Some(action) = action else {
            return false;
        };
        let kind = action.kind();
        self.redo_stack.clear();
        self.undo_stack.push(action);
        trace!(target: "state.undo", kind, undo_depth = self.undo_stack.len(), "push_action");
        self.notify();
        true
    }

    pub fn undo(&mut self, model: &mut TextBufferModel) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        action.invert(model);
        trace!(target: "state.undo", kind = action.kind(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len() + 1, "undo_pop");
        self.redo_stack.push(action);
        self.notify();
        true
    }

    pub fn redo(&mut self, model: &mut TextBufferModel) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        action.apply(model);
        trace!(target: "state.undo", kind = action.kind(), undo_depth = self.undo_stack.len() + 1, redo_depth = self.redo_stack.len(), "redo_pop");
        self.undo_stack.push(action);
        self.notify();
        true
    }

    /// Drop both histories at once (new file loaded).
    pub fn reset(&mut self) {
        self.undo_stack = Vec::new();
        self.redo_stack = Vec::new();
        trace!(target: "state.undo", "history_reset");
        self.notify();
    }

    fn notify(&mut self) {
        let undo_empty = self.undo_stack.is_empty();
        let redo_empty = self.redo_stack.is_empty();
        self.events
            .emit(EditorEvent::UndoStackChanged { empty: undo_empty });
        self.events
            .emit(EditorEvent::RedoStackChanged { empty: redo_empty });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Location;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn push_none_is_noop() {
        let mut undo = UndoManager::new();
        assert!(!undo.push(None));
        assert_eq!(undo.undo_depth(), 0);
    }

    #[test]
    fn undo_redo_move_between_stacks() {
        let mut model = TextBufferModel::new("abc");
        model.set_cursor(Location::new(0, 3));
        let mut undo = UndoManager::new();
        undo.push(model.insert("d"));
        assert_eq!(model.lines(), &["abcd"]);
        assert!(undo.undo(&mut model));
        assert_eq!(model.lines(), &["abc"]);
        assert_eq!(model.cursor(), Location::new(0, 3));
        assert_eq!((undo.undo_depth(), undo.redo_depth()), (0, 1));
        assert!(undo.redo(&mut model));
        assert_eq!(model.lines(), &["abcd"]);
        assert_eq!(model.cursor(), Location::new(0, 4));
        assert_eq!((undo.undo_depth(), undo.redo_depth()), (1, 0));
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut model = TextBufferModel::new("x");
        let mut undo = UndoManager::new();
        assert!(!undo.undo(&mut model));
        assert!(!undo.redo(&mut model));
        assert_eq!(model.lines(), &["x"]);
    }

    #[test]
    fn push_clears_redo_history() {
        let mut model = TextBufferModel::new("");
        let mut undo = UndoManager::new();
        undo.push(model.insert("a"));
        undo.push(model.insert("b"));
        undo.undo(&mut model);
        assert!(undo.can_redo());
        undo.push(model.insert("c"));
        assert!(!undo.can_redo());
        assert!(!undo.redo(&mut model));
        assert_eq!(model.lines(), &["ac"]);
    }

    #[test]
    fn notifies_stack_emptiness() {
        let mut model = TextBufferModel::new("");
        let mut undo = UndoManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        undo.subscribe(EventKinds::UNDO | EventKinds::REDO, move |ev| {
            sink.borrow_mut().push(*ev)
        });
        undo.push(model.insert("a"));
        undo.undo(&mut model);
        assert_eq!(
            *log.borrow(),
            vec![
                EditorEvent::UndoStackChanged { empty: false },
                EditorEvent::RedoStackChanged { empty: true },
                EditorEvent::UndoStackChanged { empty: true },
                EditorEvent::RedoStackChanged { empty: false },
            ]
        );
    }

    #[test]
    fn reset_empties_both_stacks() {
        let mut model = TextBufferModel::new("");
        let mut undo = UndoManager::new();
        undo.push(model.insert("a"));
        undo.push(model.insert("b"));
        undo.undo(&mut model);
        undo.reset();
        assert!(!undo.can_undo());
        assert!(!undo.can_redo());
    }
}
