//! Line command parsing.
//!
//! One command per line, keyword first. Blank lines and `#` comments parse
//! to `Noop`; anything unrecognised (including known keywords with bad
//! arguments) becomes `Unknown` carrying the trimmed line, which the
//! dispatcher reports back. Parsing has no side effects.
//!
//! `insert` takes the rest of the line verbatim after a single separating
//! space, with `\n`, `\t` and `\\` escapes. Other backslash sequences are
//! kept as written.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Insert(String),
    Newline,
    Backspace,
    Delete,
    Move(Direction),
    Home,
    End,
    Select(Direction),
    SelectAll,
    Copy,
    Cut,
    Paste,
    PasteTake,
    Clear,
    Undo,
    Redo,
    Plugin(String),
    Plugins,
    Print,
    Status,
    Open(PathBuf),
    Write(Option<PathBuf>),
    Quit,
    Noop,
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let line = raw.trim_end_matches(['\r', '\n']);
        let body = line.trim_start();
        if body.trim_end().is_empty() || body.starts_with('#') {
            return ParsedCommand::Noop;
        }
        let (word, rest) = match body.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (body, ""),
        };
        if word == "insert" {
            return if rest.is_empty() {
                ParsedCommand::Unknown(body.trim_end().to_string())
            } else {
                ParsedCommand::Insert(unescape(rest))
            };
        }
        let arg = rest.trim();
        match (word, arg.is_empty()) {
            ("newline", true) => ParsedCommand::Newline,
            ("backspace", true) => ParsedCommand::Backspace,
            ("delete", true) => ParsedCommand::Delete,
            ("left", true) => ParsedCommand::Move(Direction::Left),
            ("right", true) => ParsedCommand::Move(Direction::Right),
            ("up", true) => ParsedCommand::Move(Direction::Up),
            ("down", true) => ParsedCommand::Move(Direction::Down),
            ("home", true) => ParsedCommand::Home,
            ("end", true) => ParsedCommand::End,
            ("select-left", true) => ParsedCommand::Select(Direction::Left),
            ("select-right", true) => ParsedCommand::Select(Direction::Right),
            ("select-up", true) => ParsedCommand::Select(Direction::Up),
            ("select-down", true) => ParsedCommand::Select(Direction::Down),
            ("select-all", true) => ParsedCommand::SelectAll,
            ("copy", true) => ParsedCommand::Copy,
            ("cut", true) => ParsedCommand::Cut,
            ("paste", true) => ParsedCommand::Paste,
            ("paste-take", true) => ParsedCommand::PasteTake,
            ("clear", true) => ParsedCommand::Clear,
            ("undo", true) => ParsedCommand::Undo,
            ("redo", true) => ParsedCommand::Redo,
            ("plugins", true) => ParsedCommand::Plugins,
            ("print", true) => ParsedCommand::Print,
            ("status", true) => ParsedCommand::Status,
            ("quit", true) => ParsedCommand::Quit,
            ("write", true) => ParsedCommand::Write(None),
            ("write", false) => ParsedCommand::Write(Some(PathBuf::from(arg))),
            ("open", false) => ParsedCommand::Open(PathBuf::from(arg)),
            ("plugin", false) => ParsedCommand::Plugin(arg.to_string()),
            _ => ParsedCommand::Unknown(body.trim_end().to_string()),
        }
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
