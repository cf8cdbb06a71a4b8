//! Configuration loading and parsing.
//!
//! `tedit.toml` is looked up in the working directory, then under the
//! platform config dir (`<config_dir>/tedit/tedit.toml`). A missing file
//! yields defaults; an unreadable or invalid file logs a warning and also
//! yields defaults. Unknown fields are ignored.
//!
//! ```toml
//! [editor]
//! initial_mode = "normal"   # or "insert" (default)
//! tab_width = 4             # 1..=16
//! page_size = 20            # >= 1
//! auto_indent = false
//! history_limit = 100       # 1..=100
//!
//! [syntax]
//! language = "python"
//!
//! [theme]
//! keyword = 5
//! "constant.numeric" = 9
//! ```
//!
//! Raw values are kept as parsed; clamping happens when building
//! [`EditorOptions`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_syntax::{Language, PaletteTheme};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "tedit.toml";
pub const MAX_TAB_WIDTH: usize = 16;
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown language `{0}` in [syntax]")]
    UnknownLanguage(String),
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitialMode {
    #[default]
    Insert,
    Normal,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default)]
    pub initial_mode: InitialMode,
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "EditorConfig::default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub auto_indent: bool,
    #[serde(default = "EditorConfig::default_history_limit")]
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_mode: InitialMode::default(),
            tab_width: Self::default_tab_width(),
            page_size: Self::default_page_size(),
            auto_indent: false,
            history_limit: Self::default_history_limit(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> usize {
        4
    }
    const fn default_page_size() -> usize {
        20
    }
    const fn default_history_limit() -> usize {
        MAX_HISTORY
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SyntaxConfig {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub syntax: SyntaxConfig,
    /// Scope name to palette index.
    #[serde(default)]
    pub theme: BTreeMap<String, u16>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Runtime editor options with every value clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub initial_mode: InitialMode,
    pub tab_width: usize,
    pub page_size: usize,
    pub auto_indent: bool,
    pub history_limit: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Config::default().editor_options()
    }
}

/// Config path following platform conventions: local file first, then the
/// platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tedit").join(CONFIG_FILE_NAME);
    }
    local
}

/// Strict parse of config text.
pub fn parse_str(content: &str) -> Result<ConfigFile, ConfigError> {
    Ok(toml::from_str::<ConfigFile>(content)?)
}

/// Load configuration from `path` (or the discovered location).
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if !path.exists() {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    }
    let content = match read(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_unreadable_using_defaults");
            return Ok(Config::default());
        }
    };
    match parse_str(&content) {
        Ok(file) => {
            debug!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

impl Config {
    /// Clamp the `[editor]` values into their valid ranges, logging each clamp.
    pub fn editor_options(&self) -> EditorOptions {
        let e = &self.file.editor;
        EditorOptions {
            initial_mode: e.initial_mode,
            tab_width: clamp_logged("tab_width", e.tab_width, 1, MAX_TAB_WIDTH),
            page_size: clamp_logged("page_size", e.page_size, 1, usize::MAX),
            auto_indent: e.auto_indent,
            history_limit: clamp_logged("history_limit", e.history_limit, 1, MAX_HISTORY),
        }
    }

    /// Language named in `[syntax]`, if any.
    pub fn language(&self) -> Result<Option<Language>, ConfigError> {
        match self.file.syntax.language.as_deref() {
            None => Ok(None),
            Some(id) => Language::from_id(id)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownLanguage(id.to_string())),
        }
    }

    /// Default palette overlaid with the `[theme]` table.
    pub fn theme(&self) -> PaletteTheme {
        let mut theme = PaletteTheme::default();
        theme.extend(&self.file.theme);
        theme
    }
}

fn clamp_logged(field: &'static str, raw: usize, min: usize, max: usize) -> usize {
    let clamped = raw.clamp(min, max);
    if clamped != raw {
        info!(target: "config", field, raw, clamped, min, max, "editor_option_clamped");
    }
    clamped
}
