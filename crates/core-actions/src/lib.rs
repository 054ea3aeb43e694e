//! Session layer: binds the editing core to a file, a plugin set and a line
//! command language.
//!
//! `EditorSession` owns one model with its undo manager and clipboard.
//! `CommandParser` turns a text line into a `ParsedCommand`, and `dispatch`
//! applies it to a session, recording undoable edits along the way.

mod dispatcher;
pub mod io_ops;
pub mod session;

pub use dispatcher::{CommandParser, Direction, DispatchResult, ParsedCommand, dispatch};
pub use session::EditorSession;
