//! Undo / redo dispatch. The dispatcher marks the session dirty from the
//! model's change notifications, not these handlers.

use super::DispatchResult;
use crate::session::EditorSession;

pub(crate) fn handle_undo(session: &mut EditorSession) -> DispatchResult {
    if session.undo.undo(&mut session.model) {
        tracing::trace!(target: "actions.dispatch", op = "undo", remaining = session.undo.undo_depth(), "undo");
        DispatchResult::clean()
    } else {
        DispatchResult::message("nothing to undo")
    }
}

pub(crate) fn handle_redo(session: &mut EditorSession) -> DispatchResult {
    if session.undo.redo(&mut session.model) {
        tracing::trace!(target: "actions.dispatch", op = "redo", remaining = session.undo.redo_depth(), "redo");
        DispatchResult::clean()
    } else {
        DispatchResult::message("nothing to redo")
    }
}
