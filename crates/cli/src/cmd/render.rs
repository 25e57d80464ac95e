use crate::Cli;
use crate::{logging, prompt};
use std::io::{self, Write};
use std::process::ExitCode;
use tmplfill_core::config::{ConfigLoader, default_config_path};
use tmplfill_core::context::Context;
use tmplfill_core::driver::{self, RenderRequest};
use tracing::debug;

/// Render `cli.template`. The log guard lives until this returns, so the
/// log file is complete on every exit path.
pub fn run(cli: &Cli) -> ExitCode {
    let cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("error: {e}");
            if cli.config.is_none() {
                eprintln!("looked for: {}", default_config_path().display());
            }
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init(&cfg.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(config = ?cfg.source, "starting render");

    let overrides: Context = cli.vars.iter().cloned().collect();
    let request = RenderRequest {
        template: cli.template.clone(),
        context_file: cli.context.clone(),
        dump_context: cli.dump_context.clone(),
        output: cli.output.clone(),
        overrides,
        batch: cli.batch,
    };

    let mut console = prompt::console(cli.batch);
    let outcome = match driver::render(&request, &cfg.render, console.as_mut()) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(error = ?e, "render failed");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.dump_context {
        eprintln!("Saved context to {}", path.display());
    }

    if let Some(path) = &outcome.written_to {
        eprintln!("Wrote {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(outcome.rendered.as_bytes()).and_then(|()| stdout.flush())
        {
            eprintln!("error: failed to write output: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
