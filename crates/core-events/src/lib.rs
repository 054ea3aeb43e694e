//! Editor notification types and the synchronous event bus.
//!
//! The editing core has no event loop. Every state change is announced by
//! calling the matching subscribers inline, after the state mutation and
//! before the mutating call returns. Components own their own `EventBus`
//! (model, undo manager, clipboard) so subscribers attach where the change
//! originates.
//!
//! Subscribers filter by `EventKinds`; delivery order between subscribers is
//! registration order today but callers must not depend on it.

use core_text::Location;
use std::fmt;

/// A single notification emitted by an editing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer content changed; re-read full state.
    TextChanged,
    /// Cursor now sits at the carried location.
    CursorMoved(Location),
    /// Selection appeared, disappeared or changed extent.
    SelectionChanged { active: bool },
    ClipboardChanged { empty: bool },
    UndoStackChanged { empty: bool },
    RedoStackChanged { empty: bool },
}

impl EditorEvent {
    pub fn kind(&self) -> EventKinds {
        match self {
            EditorEvent::TextChanged => EventKinds::TEXT,
            EditorEvent::CursorMoved(_) => EventKinds::CURSOR,
            EditorEvent::SelectionChanged { .. } => EventKinds::SELECTION,
            EditorEvent::ClipboardChanged { .. } => EventKinds::CLIPBOARD,
            EditorEvent::UndoStackChanged { .. } => EventKinds::UNDO,
            EditorEvent::RedoStackChanged { .. } => EventKinds::REDO,
        }
    }
}

bitflags::bitflags! {
    /// Subscription mask over `EditorEvent` variants.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        const TEXT      = 0b0000_0001;
        const CURSOR    = 0b0000_0010;
        const SELECTION = 0b0000_0100;
        const CLIPBOARD = 0b0000_1000;
        const UNDO      = 0b0001_0000;
        const REDO      = 0b0010_0000;
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&EditorEvent)>;

struct Subscriber {
    id: SubscriptionId,
    kinds: EventKinds,
    callback: Callback,
}

/// Callback registry fanning events out synchronously.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kinds: EventKinds, callback: F) -> SubscriptionId
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kinds,
            callback: Box::new(callback),
        });
        tracing::trace!(target: "events", id = id.0, kinds = ?kinds, "subscribe");
        id
    }

    /// Returns `false` when the id was unknown (already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    pub fn emit(&mut self, event: EditorEvent) {
        let kind = event.kind();
        for sub in self.subscribers.iter_mut() {
            if sub.kinds.intersects(kind) {
                (sub.callback)(&event);
            }
        }
    }
}
