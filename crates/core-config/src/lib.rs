//! Configuration loading and parsing.
//!
//! Parses `modal.toml` (or an override path provided by the binary). Every
//! field has a default so a missing file, or a file that only sets one key,
//! yields a complete `Config`. Unknown fields are ignored to allow forward
//! evolution without warnings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "modal.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UndoConfig {
    /// Maximum undo snapshots per session (minimum 1).
    #[serde(default = "UndoConfig::default_levels")]
    pub levels: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            levels: Self::default_levels(),
        }
    }
}

impl UndoConfig {
    const fn default_levels() -> usize {
        100
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClipboardConfig {
    #[serde(default = "ClipboardConfig::default_enabled")]
    pub enabled: bool,
    /// Mirror default-register writes to the `+` register.
    #[serde(default)]
    pub unnamedplus: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            unnamedplus: false,
        }
    }
}

impl ClipboardConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

impl Config {
    /// Effective undo depth, never below one.
    pub fn undo_levels(&self) -> usize {
        self.file.undo.levels.max(1)
    }

    pub fn clipboard_enabled(&self) -> bool {
        self.file.clipboard.enabled
    }

    pub fn unnamedplus(&self) -> bool {
        self.file.clipboard.unnamedplus
    }
}

/// Best-effort config path: `./modal.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("keymode").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), undo_levels = file.undo.levels, clipboard = file.clipboard.enabled, unnamedplus = file.clipboard.unnamedplus, "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
