//! Plugins, reports and file commands.

use super::{DispatchResult, ParsedCommand};
use crate::session::EditorSession;
use core_plugin::PluginOutcome;
use std::path::Path;
use tracing::{info, warn};

pub(crate) fn handle_command(
    command: &ParsedCommand,
    session: &mut EditorSession,
) -> DispatchResult {
    match command {
        ParsedCommand::Plugin(name) => run_plugin(name, session),
        ParsedCommand::Plugins => list_plugins(session),
        ParsedCommand::Print => DispatchResult::message(session.model.text()),
        ParsedCommand::Status => DispatchResult::message(session.status_line()),
        ParsedCommand::Open(path) => handle_open(path, session),
        ParsedCommand::Write(target) => handle_write(target.as_deref(), session),
        _ => unreachable!("non-session command routed to command handler"),
    }
}

fn run_plugin(name: &str, session: &mut EditorSession) -> DispatchResult {
    let EditorSession {
        model,
        undo,
        clipboard,
        plugins,
        ..
    } = &mut *session;
    let Some(plugin) = plugins.get(name) else {
        return DispatchResult::message(format!("unknown plugin: {name}"));
    };
    match plugin.execute(model, undo, clipboard) {
        Ok(PluginOutcome { message }) => {
            info!(target: "plugin", name = plugin.name(), "plugin_executed");
            DispatchResult {
                message,
                ..DispatchResult::clean()
            }
        }
        Err(e) => {
            warn!(target: "plugin", name = plugin.name(), error = %e, "plugin_failed");
            DispatchResult::message(format!("plugin {} failed: {e:#}", plugin.name()))
        }
    }
}

fn list_plugins(session: &EditorSession) -> DispatchResult {
    if session.plugins.is_empty() {
        return DispatchResult::message("no plugins enabled");
    }
    let listing = session
        .plugins
        .iter()
        .map(|p| format!("{} - {}", p.name(), p.description()))
        .collect::<Vec<_>>()
        .join("\n");
    DispatchResult::message(listing)
}

fn handle_open(path: &Path, session: &mut EditorSession) -> DispatchResult {
    match session.open(path) {
        Ok(()) => DispatchResult::message(format!("Opened {}", path.display())),
        Err(e) => DispatchResult::message(format!("{e:#}")),
    }
}

fn handle_write(target: Option<&Path>, session: &mut EditorSession) -> DispatchResult {
    match session.write(target) {
        Ok(path) => DispatchResult::message(format!("Wrote {}", path.display())),
        Err(e) => DispatchResult::message(format!("{e:#}")),
    }
}
