use crate::{Plugin, PluginOutcome};
use anyhow::bail;
use core_state::{ClipboardStack, EditAction, TextBufferModel, UndoManager};
use core_text::join_lines;
use tracing::debug;

/// Upper-cases the first letter of every word. A word is a run of
/// alphabetic characters, so `o'neil` becomes `O'Neil`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Capitalize;

impl Plugin for Capitalize {
    fn name(&self) -> &'static str {
        "Capitalize"
    }

    fn description(&self) -> &'static str {
        "Capitalizes all words in the document."
    }

    fn execute(
        &self,
        model: &mut TextBufferModel,
        undo: &mut UndoManager,
        _clipboard: &mut ClipboardStack,
    ) -> anyhow::Result<PluginOutcome> {
        let original = join_lines(model.lines());
        let capitalized = join_lines(
            &model
                .lines()
                .iter()
                .map(|l| capitalize_line(l))
                .collect::<Vec<_>>(),
        );
        if capitalized == original {
            return Ok(PluginOutcome::with_message("Nothing to capitalize"));
        }

        let cleared = model.clear();
        let inserted = model.insert(&capitalized);
        if inserted.is_none() {
            // Text the model refuses to insert (control characters); put it back.
            if let Some(action) = &cleared {
                action.invert(model);
            }
            bail!("document contains characters that cannot be re-inserted");
        }
        let action = EditAction::combine(cleared, inserted);
        debug!(target: "plugin", name = self.name(), lines = model.line_count(), "capitalize_applied");
        undo.push(action);
        Ok(PluginOutcome::silent())
    }
}

fn capitalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut at_word_start = true;
    for ch in line.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
