//! Cursor movement and selection growth. Never touches undo history.

use super::{DispatchResult, Direction, ParsedCommand};
use crate::session::EditorSession;

pub(crate) fn handle_move(dir: Direction, session: &mut EditorSession) -> DispatchResult {
    let model = &mut session.model;
    let moved = match dir {
        Direction::Left => model.move_cursor_left(true),
        Direction::Right => model.move_cursor_right(true),
        Direction::Up => model.move_cursor_up(true),
        Direction::Down => model.move_cursor_down(true),
    };
    tracing::trace!(target: "actions.dispatch", ?dir, moved, "move");
    DispatchResult::clean()
}

pub(crate) fn handle_select(dir: Direction, session: &mut EditorSession) -> DispatchResult {
    let model = &mut session.model;
    match dir {
        Direction::Left => model.select_left(),
        Direction::Right => model.select_right(),
        Direction::Up => model.select_up(),
        Direction::Down => model.select_down(),
    }
    DispatchResult::clean()
}

pub(crate) fn handle_jump(command: &ParsedCommand, session: &mut EditorSession) -> DispatchResult {
    let model = &mut session.model;
    match command {
        ParsedCommand::Home => model.move_cursor_start(),
        ParsedCommand::End => model.move_cursor_end(),
        ParsedCommand::SelectAll => model.select_all(),
        _ => unreachable!("non-jump command routed to jump handler"),
    }
    DispatchResult::clean()
}
