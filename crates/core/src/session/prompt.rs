use std::collections::BTreeSet;
use std::io;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::console::Console;
use super::report::{SessionReport, VarState};
use crate::context::Context;
use crate::vars::{CoercionError, ResolvedVariableSet, VariableMetadata, coerce, infer};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid value for '{name}': {source}")]
    Coercion {
        name: String,
        #[source]
        source: CoercionError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Never prompt; use defaults or leave values out.
    pub batch: bool,
    /// Context names that were supplied up front rather than loaded from a
    /// context file. Only changes the notice shown for them.
    pub provided: BTreeSet<String>,
}

/// Fill `ctx` with a value for every variable in `vars`.
///
/// Variables already in `ctx` are announced and left untouched. The others
/// are prompted in order: declared variables with their description and type,
/// synthesized ones with a minimal prompt and type inference.
pub fn run_session(
    vars: &ResolvedVariableSet,
    ctx: &mut Context,
    console: &mut dyn Console,
    opts: &SessionOptions,
) -> Result<SessionReport, SessionError> {
    let mut report = SessionReport::default();

    for meta in vars {
        let name = meta.name();

        let state = if let Some(existing) = ctx.get(name) {
            let shown = display_value(existing);
            if opts.provided.contains(name) {
                console.notice(&format!("Using provided value for '{name}': {shown}"))?;
                VarState::SkippedProvided
            } else {
                console.notice(&format!("Using '{name}' from context: {shown}"))?;
                VarState::SkippedContext
            }
        } else if opts.batch {
            unattended(meta)
        } else if meta.is_declared() {
            prompt_declared(meta, console)?
        } else {
            prompt_heuristic(meta, console)?
        };

        debug!(var = name, ?state, "variable settled");
        if let Some(value) = state.value() {
            ctx.insert(name, value.clone());
        }
        report.record(name, state);
    }

    Ok(report)
}

/// Outcome when no answer can be read.
fn unattended(meta: &VariableMetadata) -> VarState {
    match meta.default() {
        Some(default) => VarState::Defaulted(default.clone()),
        None if meta.is_required() => VarState::RejectedRequired,
        None => VarState::Absent,
    }
}

fn prompt_declared(
    meta: &VariableMetadata,
    console: &mut dyn Console,
) -> Result<VarState, SessionError> {
    let label = declared_label(meta);
    let tag = meta.type_tag();

    loop {
        let Some(line) = console.read_line(&label)? else {
            return Ok(unattended(meta));
        };
        let input = line.trim();

        if input.is_empty() {
            if let Some(default) = meta.default() {
                return Ok(VarState::Defaulted(default.clone()));
            }
            if meta.is_required() {
                console.notice(&format!("'{}' is required.", meta.name()))?;
                continue;
            }
            return Ok(VarState::Absent);
        }

        match coerce(input, &tag) {
            Ok(value) => return Ok(VarState::Resolved(value)),
            Err(e) => console.notice(&format!("{e}. Please try again."))?,
        }
    }
}

fn prompt_heuristic(
    meta: &VariableMetadata,
    console: &mut dyn Console,
) -> Result<VarState, SessionError> {
    let name = meta.name();
    let label = format!("Value for '{name}'{}: ", default_suffix(meta.default()));
    let line = console.read_line(&label)?.unwrap_or_default();

    let inferred = infer(&line)
        .map_err(|source| SessionError::Coercion { name: name.to_string(), source })?;

    Ok(match inferred {
        Some(value) => VarState::Resolved(value),
        None => unattended(meta),
    })
}

fn declared_label(meta: &VariableMetadata) -> String {
    let mut label = match meta.description() {
        "" => meta.name().to_string(),
        desc => desc.to_string(),
    };
    if let Some(example) = meta.example() {
        label.push_str(&format!(" (example: {example})"));
    }
    label.push_str(&default_suffix(meta.default()));
    label.push_str(": ");
    label
}

fn default_suffix(default: Option<&Value>) -> String {
    default.map(|v| format!(" [{}]", display_value(v))).unwrap_or_default()
}

/// Strings as-is, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
