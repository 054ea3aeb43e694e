//! Dispatcher applying a `ParsedCommand` to an `EditorSession`.
//!
//! Sub-modules:
//! * `motion`  - cursor movement and selection growth
//! * `edit`    - text mutation and clipboard transfer
//! * `undo`    - undo / redo
//! * `command` - plugins, reporting and file commands
//!
//! Every `EditAction` a handler obtains is pushed onto the session's undo
//! manager. `DispatchResult::dirty` reports whether the buffer content
//! changed during the call, whatever the cause (edit, undo, plugin, open).

use crate::session::EditorSession;
use tracing::trace;

mod command;
pub(crate) mod command_parser;
mod edit;
mod motion;
mod undo;

pub use command_parser::{CommandParser, Direction, ParsedCommand};

/// Outcome of dispatching one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// Text for the user (report, status, or why nothing happened).
    pub message: Option<String>,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }
}

pub fn dispatch(command: &ParsedCommand, session: &mut EditorSession) -> DispatchResult {
    let revision = session.revision();
    let mut result = match command {
        ParsedCommand::Move(dir) => motion::handle_move(*dir, session),
        ParsedCommand::Select(dir) => motion::handle_select(*dir, session),
        ParsedCommand::Home | ParsedCommand::End | ParsedCommand::SelectAll => {
            motion::handle_jump(command, session)
        }
        ParsedCommand::Insert(_)
        | ParsedCommand::Newline
        | ParsedCommand::Backspace
        | ParsedCommand::Delete
        | ParsedCommand::Clear => edit::handle_edit(command, session),
        ParsedCommand::Copy
        | ParsedCommand::Cut
        | ParsedCommand::Paste
        | ParsedCommand::PasteTake => edit::handle_clipboard(command, session),
        ParsedCommand::Undo => undo::handle_undo(session),
        ParsedCommand::Redo => undo::handle_redo(session),
        ParsedCommand::Plugin(_)
        | ParsedCommand::Plugins
        | ParsedCommand::Print
        | ParsedCommand::Status
        | ParsedCommand::Open(_)
        | ParsedCommand::Write(_) => command::handle_command(command, session),
        ParsedCommand::Quit => DispatchResult::quit(),
        ParsedCommand::Noop => DispatchResult::clean(),
        ParsedCommand::Unknown(raw) => DispatchResult::message(format!("unknown command: {raw}")),
    };
    result.dirty = session.revision() != revision;
    // Opening a file replaces the text but leaves the session clean.
    if result.dirty && !matches!(command, ParsedCommand::Open(_)) {
        session.dirty = true;
    }
    trace!(target: "actions.dispatch", ?command, dirty = result.dirty, quit = result.quit, "dispatch");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Location;

    fn run(session: &mut EditorSession, line: &str) -> DispatchResult {
        dispatch(&CommandParser::parse(line), session)
    }

    #[test]
    fn insert_then_undo_redo() {
        let mut s = EditorSession::default();
        assert!(run(&mut s, "insert abc").dirty);
        assert_eq!(s.model.lines(), &["abc"]);
        let r = run(&mut s, "undo");
        assert!(r.dirty);
        assert_eq!(s.model.lines(), &[""]);
        run(&mut s, "redo");
        assert_eq!(s.model.lines(), &["abc"]);
        assert_eq!(s.model.cursor(), Location::new(0, 3));
    }

    #[test]
    fn motions_are_not_dirty() {
        let mut s = EditorSession::default();
        run(&mut s, "insert ab");
        let r = run(&mut s, "left");
        assert!(!r.dirty);
        assert_eq!(s.model.cursor(), Location::new(0, 1));
    }

    #[test]
    fn empty_history_reports() {
        let mut s = EditorSession::default();
        assert_eq!(run(&mut s, "undo").message.as_deref(), Some("nothing to undo"));
        assert_eq!(run(&mut s, "redo").message.as_deref(), Some("nothing to redo"));
    }

    #[test]
    fn unknown_and_noop() {
        let mut s = EditorSession::default();
        assert_eq!(
            run(&mut s, "frob x").message.as_deref(),
            Some("unknown command: frob x")
        );
        assert_eq!(run(&mut s, "# comment"), DispatchResult::clean());
        assert!(run(&mut s, "quit").quit);
    }

    #[test]
    fn cut_paste_through_commands() {
        let mut s = EditorSession::default();
        run(&mut s, "insert hello world");
        run(&mut s, "home");
        for _ in 0..5 {
            run(&mut s, "select-right");
        }
        run(&mut s, "cut");
        assert_eq!(s.model.lines(), &[" world"]);
        run(&mut s, "end");
        run(&mut s, "paste");
        assert_eq!(s.model.lines(), &[" worldhello"]);
        run(&mut s, "undo");
        run(&mut s, "undo");
        assert_eq!(s.model.lines(), &["hello world"]);
        assert_eq!(s.undo.undo_depth(), 1);
    }
}
