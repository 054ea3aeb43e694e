//! Editor plugins.
//!
//! A plugin is a named command that gets full access to the editing core for
//! one call: the buffer model, the undo manager and the clipboard stack. Any
//! buffer change it makes must be pushed onto the undo manager by the plugin
//! itself so the user can undo it as one step.
//!
//! Plugins are compiled in and collected in a `PluginRegistry`. The registry
//! built by `with_builtins` holds every bundled plugin; the session narrows it
//! with `retain_enabled` from the config's `[plugins] enabled` list.

use core_state::{ClipboardStack, TextBufferModel, UndoManager};
use tracing::debug;

mod capitalize;
mod statistics;

pub use capitalize::Capitalize;
pub use statistics::Statistics;

/// What a plugin reports back after running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOutcome {
    pub message: Option<String>,
}

impl PluginOutcome {
    pub fn silent() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

pub trait Plugin {
    /// Display name; lookups ignore case.
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn execute(
        &self,
        model: &mut TextBufferModel,
        undo: &mut UndoManager,
        clipboard: &mut ClipboardStack,
    ) -> anyhow::Result<PluginOutcome>;
}

#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Capitalize));
        registry.register(Box::new(Statistics));
        registry
    }

    /// Add `plugin`, replacing any registered plugin with the same name.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        let name = plugin.name();
        self.plugins.retain(|p| !p.name().eq_ignore_ascii_case(name));
        debug!(target: "plugin", name, "plugin_registered");
        self.plugins.push(plugin);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Keep only plugins named in `enabled` (case-insensitive).
    pub fn retain_enabled(&mut self, enabled: &[String]) {
        self.plugins.retain(|p| {
            let keep = enabled.iter().any(|n| n.eq_ignore_ascii_case(p.name()));
            if !keep {
                debug!(target: "plugin", name = p.name(), "plugin_disabled_by_config");
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Plugin for Echo {
        fn name(&self) -> &'static str {
            "Statistics"
        }
        fn description(&self) -> &'static str {
            "stand-in"
        }
        fn execute(
            &self,
            _model: &mut TextBufferModel,
            _undo: &mut UndoManager,
            _clipboard: &mut ClipboardStack,
        ) -> anyhow::Result<PluginOutcome> {
            Ok(PluginOutcome::with_message("echo"))
        }
    }

    #[test]
    fn builtins_are_registered_in_order() {
        let registry = PluginRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["Capitalize", "Statistics"]);
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = PluginRegistry::with_builtins();
        assert_eq!(registry.get("capitalize").map(|p| p.name()), Some("Capitalize"));
        assert_eq!(registry.get("STATISTICS").map(|p| p.name()), Some("Statistics"));
        assert!(registry.get("spellcheck").is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = PluginRegistry::with_builtins();
        registry.register(Box::new(Echo));
        assert_eq!(registry.len(), 2);
        let plugin = registry.get("statistics").expect("registered");
        assert_eq!(plugin.description(), "stand-in");
    }

    #[test]
    fn retain_enabled_filters() {
        let mut registry = PluginRegistry::with_builtins();
        registry.retain_enabled(&["statistics".to_string()]);
        assert_eq!(registry.names(), vec!["Statistics"]);
        registry.retain_enabled(&[]);
        assert!(registry.is_empty());
    }
}
