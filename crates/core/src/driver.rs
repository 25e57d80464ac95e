//! End-to-end render pipeline.
//!
//! Load the template and any context file, work out which variables the
//! template needs, prompt for the missing ones, then render. Files are only
//! written once every variable is settled.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::RenderConfig;
use crate::context::{self, Context, ContextError};
use crate::header;
use crate::session::{Console, SessionError, SessionOptions, SessionReport, run_session};
use crate::templates::repository::{self, LoadedTemplate};
use crate::templates::{JinjaEngine, RenderError, TemplateEngine, TemplateLoadError, scan_defaults};
use crate::vars::resolve;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Template(#[from] TemplateLoadError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("missing value for required variable(s): {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to render and where the results go.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub template: PathBuf,
    /// Context file to seed values from.
    pub context_file: Option<PathBuf>,
    /// Where to save the final context.
    pub dump_context: Option<PathBuf>,
    /// Output file; `None` leaves writing the result to the caller.
    pub output: Option<PathBuf>,
    /// Values supplied up front. They win over the context file.
    pub overrides: Context,
    /// Never prompt.
    pub batch: bool,
}

#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub rendered: String,
    pub context: Context,
    pub report: SessionReport,
    pub written_to: Option<PathBuf>,
}

/// Render `request.template` with the `minijinja` engine.
pub fn render(
    request: &RenderRequest,
    config: &RenderConfig,
    console: &mut dyn Console,
) -> Result<RenderOutcome, DriverError> {
    let template = repository::load(&request.template)?;

    let mut engine = JinjaEngine::new(*config);
    if let Some(dir) = template.dir() {
        engine = engine.with_search_dir(dir);
    }

    render_with(&engine, &template, request, console)
}

/// Render an already loaded template with any engine.
pub fn render_with<E: TemplateEngine + ?Sized>(
    engine: &E,
    template: &LoadedTemplate,
    request: &RenderRequest,
    console: &mut dyn Console,
) -> Result<RenderOutcome, DriverError> {
    let mut ctx = match &request.context_file {
        Some(path) => context::load(path)?,
        None => Context::new(),
    };
    let provided: BTreeSet<String> = request.overrides.names().map(str::to_string).collect();
    ctx.merge(request.overrides.clone());

    let parsed = engine.parse(&template.name, &template.source)?;

    let header = header::extract(&template.source);
    if header.is_some() {
        console
            .notice("Using variable descriptions from the template header.")
            .map_err(SessionError::Io)?;
    } else {
        console
            .notice("No template header found; prompting for each variable.")
            .map_err(SessionError::Io)?;
    }

    let defaults = scan_defaults(&parsed);
    let free_vars = engine.free_variables(&parsed)?;
    let vars = resolve(&free_vars, header.as_ref(), &defaults);
    debug!(
        template = %template.name,
        vars = vars.len(),
        defaults = defaults.len(),
        "resolved variables"
    );

    let opts = SessionOptions { batch: request.batch, provided };
    let report = run_session(&vars, &mut ctx, console, &opts)?;
    debug!(
        prompted = ?report.prompted(),
        defaulted = ?report.defaulted(),
        skipped = ?report.skipped(),
        absent = ?report.absent(),
        "prompting finished"
    );

    let missing = report.missing_required();
    if !missing.is_empty() {
        return Err(DriverError::MissingRequired(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    if let Some(path) = &request.dump_context {
        context::save(path, &ctx)?;
        debug!(path = %path.display(), "context saved");
    }

    let rendered = engine.render(&parsed, &ctx)?;

    if let Some(path) = &request.output {
        write_output(path, &rendered)?;
        debug!(path = %path.display(), "output written");
    }

    Ok(RenderOutcome { rendered, context: ctx, report, written_to: request.output.clone() })
}

fn write_output(path: &Path, rendered: &str) -> Result<(), DriverError> {
    let to_err = |source| DriverError::Output { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, rendered).map_err(to_err)
}
