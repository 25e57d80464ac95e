use std::fs::File;
use std::io;

use tmplfill_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Keeps the log file writer alive. Buffered lines are flushed on drop, so
/// hold it until the process is about to exit.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber: human-readable lines on stderr, plus a
/// plain-text file when `cfg.file` is set. `verbose` raises stderr to debug.
pub fn init(cfg: &LoggingConfig, verbose: bool) -> io::Result<LogGuard> {
    let stderr_level = if verbose {
        LevelFilter::DEBUG
    } else {
        parse_level(&cfg.level).unwrap_or(LevelFilter::INFO)
    };
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter(stderr_level));

    let (file_layer, guard) = match &cfg.file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("failed to create log file {}: {e}", path.display()),
                )
            })?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            let level = cfg.file_level.as_deref().unwrap_or(&cfg.level);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter(parse_level(level).unwrap_or(LevelFilter::DEBUG)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
    Ok(LogGuard { _file: guard })
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Level names are case-insensitive; `off` disables the layer.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim() {
        "" => None,
        level => level.parse().ok(),
    }
}
