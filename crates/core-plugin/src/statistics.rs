use crate::{Plugin, PluginOutcome};
use core_state::{ClipboardStack, TextBufferModel, UndoManager};

/// Reports line, word and non-whitespace character counts. Read-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub lines: usize,
    pub words: usize,
    pub characters: usize,
}

impl DocumentStats {
    pub fn of(lines: &[String]) -> Self {
        Self {
            lines: lines.len(),
            words: lines.iter().map(|l| l.split_whitespace().count()).sum(),
            characters: lines
                .iter()
                .flat_map(|l| l.chars())
                .filter(|c| !c.is_whitespace())
                .count(),
        }
    }
}

impl std::fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lines: {}\nWords: {}\nCharacters: {}",
            self.lines, self.words, self.characters
        )
    }
}

impl Plugin for Statistics {
    fn name(&self) -> &'static str {
        "Statistics"
    }

    fn description(&self) -> &'static str {
        "Displays the number of lines, words and characters in the document."
    }

    fn execute(
        &self,
        model: &mut TextBufferModel,
        _undo: &mut UndoManager,
        _clipboard: &mut ClipboardStack,
    ) -> anyhow::Result<PluginOutcome> {
        let stats = DocumentStats::of(model.lines());
        Ok(PluginOutcome::with_message(stats.to_string()))
    }
}
