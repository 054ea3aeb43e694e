//! `scribe`: line-command front end for the editing core.
//!
//! Reads one command per line from a script file or stdin, applies it to an
//! editor session and prints whatever the command reports. Runs until `quit`
//! or end of input.

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{CommandParser, EditorSession, dispatch};
use core_config::{Config, load_from};
use core_events::{EditorEvent, EventKinds};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Scriptable line-buffer editor")]
struct Args {
    /// File to open at startup. Without it the session starts empty.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `scribe.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Read commands from this file instead of stdin.
    #[arg(long = "script")]
    pub script: Option<PathBuf>,
}

fn configure_logging(log_file: &str) -> Option<WorkerGuard> {
    let log_path = Path::new(log_file);
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scribe.log".into());
    let full_path = log_dir.join(&file_name);
    if full_path.exists() {
        let _ = std::fs::remove_file(&full_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

/// Record panics (an out-of-range undo location, say) in the log file
/// before the default hook prints them.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("non-string panic payload");
            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()));
            tracing::error!(target: "runtime.panic", message, location = location.as_deref(), "editor_panicked");
            previous(info);
        }));
    });
}

/// Trace every component notification under the `events` target.
fn observe_session(session: &mut EditorSession) {
    fn log_event(event: &EditorEvent) {
        trace!(target: "events", ?event, "editor_event");
    }
    session.model.subscribe(
        EventKinds::TEXT | EventKinds::CURSOR | EventKinds::SELECTION,
        log_event,
    );
    session
        .undo
        .subscribe(EventKinds::UNDO | EventKinds::REDO, log_event);
    session.clipboard.subscribe(EventKinds::CLIPBOARD, log_event);
}

fn build_session(config: &Config, path: Option<&Path>) -> EditorSession {
    let mut session = EditorSession::new(config);
    observe_session(&mut session);
    if let Some(path) = path
        && let Err(e) = session.open(path)
    {
        // Keep the path so `write` creates the file.
        warn!(target: "runtime.startup", path = %path.display(), error = %format!("{e:#}"), "open_failed_starting_empty");
        session.file_name = Some(path.to_path_buf());
    }
    session
}

/// Feed `input` line by line to the dispatcher, writing messages to `out`.
/// Returns the number of commands executed.
fn run_commands<R: BufRead, W: Write>(
    session: &mut EditorSession,
    input: R,
    out: &mut W,
) -> Result<usize> {
    let mut executed = 0;
    for line in input.lines() {
        let line = line.context("failed to read command input")?;
        let command = CommandParser::parse(&line);
        let result = dispatch(&command, session);
        executed += 1;
        if let Some(message) = result.message {
            writeln!(out, "{message}")?;
        }
        if result.quit {
            info!(target: "runtime", executed, dirty = session.dirty, "quit_requested");
            break;
        }
    }
    out.flush()?;
    Ok(executed)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let _log_guard = configure_logging(config.log_file());
    install_panic_hook();

    info!(
        target: "runtime.startup",
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        clipboard_capacity = config.clipboard_capacity(),
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        "startup"
    );

    let mut session = build_session(&config, args.path.as_deref());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let executed = match &args.script {
        Some(script) => {
            let file = File::open(script)
                .with_context(|| format!("failed to open script {}", script.display()))?;
            run_commands(&mut session, BufReader::new(file), &mut out)?
        }
        None => run_commands(&mut session, io::stdin().lock(), &mut out)?,
    };
    if session.dirty {
        warn!(target: "runtime", "exit_with_unsaved_changes");
    }
    info!(target: "runtime", executed, "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(session: &mut EditorSession, script: &str) -> (usize, String) {
        let mut out = Vec::new();
        let executed = run_commands(session, Cursor::new(script), &mut out).unwrap();
        (executed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn args_parse_path_config_and_script() {
        let args =
            Args::try_parse_from(["scribe", "notes.txt", "--config", "c.toml", "--script", "s.txt"])
                .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
        assert_eq!(args.script, Some(PathBuf::from("s.txt")));
    }

    #[test]
    fn prints_messages_and_stops_at_quit() {
        let mut session = EditorSession::default();
        let (executed, output) = run(&mut session, "insert hi\nprint\nquit\ninsert ignored\n");
        assert_eq!(executed, 3);
        assert_eq!(output, "hi\n");
        assert_eq!(session.model.lines(), &["hi"]);
    }

    #[test]
    fn runs_to_end_of_input_without_quit() {
        let mut session = EditorSession::default();
        let (executed, output) = run(&mut session, "# setup\ninsert a\nundo\nundo\n");
        assert_eq!(executed, 4);
        assert_eq!(output, "nothing to undo\n");
    }

    #[test]
    fn missing_startup_file_keeps_name_for_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        let mut session = build_session(&Config::default(), Some(&path));
        assert_eq!(session.model.lines(), &[""]);
        run(&mut session, "insert created\nwrite\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "created");
    }
}
