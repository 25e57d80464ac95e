//! Context side files: a flat JSON object of variable values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::Context;

/// Error type for context file operations.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("context file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read context file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse context file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("context file {0} must contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("failed to serialize context: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write context file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

type Result<T> = std::result::Result<T, ContextError>;

/// Load a context file.
pub fn load(path: &Path) -> Result<Context> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ContextError::Missing(path.to_path_buf())
        } else {
            ContextError::Read { path: path.to_path_buf(), source }
        }
    })?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|source| ContextError::Parse { path: path.to_path_buf(), source })?;

    match value {
        Value::Object(map) => {
            debug!(path = %path.display(), entries = map.len(), "loaded context");
            Ok(Context::from(map))
        }
        _ => Err(ContextError::NotAnObject(path.to_path_buf())),
    }
}

/// Write `ctx` as pretty-printed JSON, creating parent directories.
pub fn save(path: &Path, ctx: &Context) -> Result<()> {
    let mut content = serde_json::to_string_pretty(ctx)?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| ContextError::Write { path: path.to_path_buf(), source })?;
    }
    fs::write(path, content)
        .map_err(|source| ContextError::Write { path: path.to_path_buf(), source })?;

    debug!(path = %path.display(), entries = ctx.len(), "saved context");
    Ok(())
}
