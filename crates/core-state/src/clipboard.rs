//! Clipboard stack: last-in-first-out store of copied text.
//!
//! Unbounded by default. An optional capacity turns it into a bounded stack
//! that drops the oldest entry when a push would exceed the limit.

use core_events::{EditorEvent, EventBus, EventKinds, SubscriptionId};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is empty")]
    Empty,
}

#[derive(Debug, Default)]
pub struct ClipboardStack {
    texts: Vec<String>,
    capacity: Option<usize>,
    events: EventBus,
}

impl ClipboardStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(0)` is treated as unbounded.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.filter(|c| *c > 0),
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
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

    pub fn push<S: Into<String>>(&mut self, text: S) {
        self.texts.push(text.into());
        if let Some(cap) = self.capacity
            && self.texts.len() > cap
        {
            self.texts.remove(0);
            trace!(target: "state.clipboard", cap, "clipboard_oldest_dropped");
        }
        trace!(target: "state.clipboard", depth = self.texts.len(), "clipboard_push");
        self.notify();
    }

    pub fn pop(&mut self) -> Result<String, ClipboardError> {
        let text = self.texts.pop().ok_or(ClipboardError::Empty)?;
        trace!(target: "state.clipboard", depth = self.texts.len(), "clipboard_pop");
        self.notify();
        Ok(text)
    }

    pub fn peek(&self) -> Result<&str, ClipboardError> {
        self.texts
            .last()
            .map(String::as_str)
            .ok_or(ClipboardError::Empty)
    }

    pub fn clear(&mut self) {
        self.texts.clear();
        self.notify();
    }

    fn notify(&mut self) {
        let empty = self.texts.is_empty();
        self.events.emit(EditorEvent::ClipboardChanged { empty });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn lifo_order() {
        let mut clip = ClipboardStack::new();
        clip.push("one");
        clip.push("two");
        assert_eq!(clip.peek(), Ok("two"));
        assert_eq!(clip.pop(), Ok("two".to_string()));
        assert_eq!(clip.pop(), Ok("one".to_string()));
        assert!(clip.is_empty());
    }

    #[test]
    fn empty_access_fails() {
        let mut clip = ClipboardStack::new();
        assert_eq!(clip.peek(), Err(ClipboardError::Empty));
        assert_eq!(clip.pop(), Err(ClipboardError::Empty));
        assert_eq!(ClipboardError::Empty.to_string(), "clipboard is empty");
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut clip = ClipboardStack::with_capacity_limit(Some(2));
        clip.push("a");
        clip.push("b");
        clip.push("c");
        assert_eq!(clip.len(), 2);
        assert_eq!(clip.pop(), Ok("c".to_string()));
        assert_eq!(clip.pop(), Ok("b".to_string()));
        assert!(clip.is_empty());
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        let clip = ClipboardStack::with_capacity_limit(Some(0));
        assert_eq!(clip.capacity(), None);
    }

    #[test]
    fn mutations_notify_emptiness() {
        let mut clip = ClipboardStack::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        clip.subscribe(EventKinds::CLIPBOARD, move |ev| sink.borrow_mut().push(*ev));
        clip.push("x");
        let _ = clip.peek();
        clip.clear();
        let _ = clip.pop();
        assert_eq!(
            *log.borrow(),
            vec![
                EditorEvent::ClipboardChanged { empty: false },
                EditorEvent::ClipboardChanged { empty: true },
            ]
        );
    }
}
