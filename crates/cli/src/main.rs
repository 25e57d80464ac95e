mod cmd;
mod logging;
mod prompt;

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "tmplfill",
    version,
    about = "Fill in template variables interactively and render the result"
)]
pub struct Cli {
    /// Template file to render
    pub template: PathBuf,

    /// Write the rendered output here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Save the final variable values as JSON
    #[arg(long, value_name = "PATH")]
    pub dump_context: Option<PathBuf>,

    /// Load variable values from a JSON file; these are not prompted for
    #[arg(long, value_name = "PATH")]
    pub context: Option<PathBuf>,

    /// Set a variable (repeatable); overrides --context
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,

    /// Never prompt; use defaults and fail on missing required variables
    #[arg(long)]
    pub batch: bool,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse `key=value`, inferring the value's type the way the prompt does.
fn parse_var(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) =
        arg.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing variable name in '{arg}'"));
    }

    let value = tmplfill_core::vars::infer(raw)
        .map_err(|e| e.to_string())?
        .unwrap_or_else(|| Value::String(String::new()));
    Ok((key.to_string(), value))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cmd::render::run(&cli)
}
