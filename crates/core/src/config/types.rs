use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Whitespace handling for the template engine.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Drop the first newline after a block tag.
    #[serde(default = "default_true")]
    pub trim_blocks: bool,
    /// Strip whitespace from the start of a line up to a block tag.
    #[serde(default = "default_true")]
    pub lstrip_blocks: bool,
    #[serde(default)]
    pub keep_trailing_newline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { trim_blocks: true, lstrip_blocks: true, keep_trailing_newline: false }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// File the settings came from; `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub render: RenderConfig,
}
