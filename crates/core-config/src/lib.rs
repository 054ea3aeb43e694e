//! Configuration loading for `scribe.toml`.
//!
//! Sections:
//! * `[clipboard] capacity = <usize>`: bound on the clipboard stack; absent
//!   (or 0) keeps it unbounded.
//! * `[log] file = "<path>"`: log file written by the binary.
//! * `[plugins] enabled = ["capitalize", ...]`: plugins to keep registered;
//!   absent keeps every built-in.
//!
//! A missing file yields defaults. A file that fails to parse is reported at
//! warn level and also yields defaults, so a typo never blocks editing.
//! Unknown fields are ignored.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "scribe.toml";

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub capacity: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
        }
    }
}

impl LogConfig {
    fn default_file() -> String {
        "scribe.log".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PluginsConfig {
    #[serde(default)]
    pub enabled: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
}

impl Config {
    /// Effective clipboard bound (`None` = unbounded).
    pub fn clipboard_capacity(&self) -> Option<usize> {
        self.file.clipboard.capacity.filter(|c| *c > 0)
    }

    pub fn log_file(&self) -> &str {
        &self.file.log.file
    }

    pub fn enabled_plugins(&self) -> Option<&[String]> {
        self.file.plugins.enabled.as_deref()
    }
}

/// Local `scribe.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scribe").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            debug!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_scribe__.toml"))).unwrap();
        assert_eq!(cfg.clipboard_capacity(), None);
        assert_eq!(cfg.log_file(), "scribe.log");
        assert_eq!(cfg.enabled_plugins(), None);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config(
            "[clipboard]\ncapacity = 4\n\n[log]\nfile = \"edit.log\"\n\n[plugins]\nenabled = [\"statistics\"]\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.clipboard_capacity(), Some(4));
        assert_eq!(cfg.log_file(), "edit.log");
        assert_eq!(cfg.enabled_plugins(), Some(&["statistics".to_string()][..]));
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = write_config("[clipboard]\ncapacity = 0\nunknown = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.clipboard_capacity(), None, "zero capacity means unbounded");
        assert_eq!(cfg.file.log, LogConfig::default());
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[clipboard\ncapacity = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.source.is_none());
    }
}
