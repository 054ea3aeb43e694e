//! Text mutation and clipboard transfer.
//!
//! Each handler records the returned action on the session's undo manager;
//! a `None` action means the model found nothing to do.

use super::{DispatchResult, ParsedCommand};
use crate::session::EditorSession;

pub(crate) fn handle_edit(command: &ParsedCommand, session: &mut EditorSession) -> DispatchResult {
    let model = &mut session.model;
    let action = match command {
        ParsedCommand::Insert(text) => model.insert(text),
        ParsedCommand::Newline => model.insert("\n"),
        ParsedCommand::Backspace => model.delete_before(None),
        ParsedCommand::Delete => model.delete_after(None),
        ParsedCommand::Clear => model.clear(),
        _ => unreachable!("non-edit command routed to edit handler"),
    };
    session.record(action);
    DispatchResult::clean()
}

pub(crate) fn handle_clipboard(
    command: &ParsedCommand,
    session: &mut EditorSession,
) -> DispatchResult {
    let EditorSession {
        model, clipboard, ..
    } = &mut *session;
    let action = match command {
        ParsedCommand::Copy => {
            if !model.copy(clipboard) {
                return DispatchResult::message("nothing selected");
            }
            None
        }
        ParsedCommand::Cut => {
            if model.selection().is_none() {
                return DispatchResult::message("nothing selected");
            }
            model.cut(clipboard)
        }
        ParsedCommand::Paste | ParsedCommand::PasteTake => {
            if let Err(e) = clipboard.peek() {
                return DispatchResult::message(e.to_string());
            }
            let action = if matches!(command, ParsedCommand::Paste) {
                model.paste(clipboard)
            } else {
                model.paste_and_take(clipboard)
            };
            // The model refuses text carrying control characters.
            if action.is_none() {
                return DispatchResult::message("clipboard text cannot be inserted");
            }
            action
        }
        _ => unreachable!("non-clipboard command routed to clipboard handler"),
    };
    session.record(action);
    DispatchResult::clean()
}
