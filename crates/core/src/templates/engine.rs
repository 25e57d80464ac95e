//! Template engine seam.
//!
//! [`TemplateEngine`] is what the render driver talks to: it parses a template
//! into the syntax tree used for default scanning, lists the template's free
//! variables and renders it against a [`Context`]. [`JinjaEngine`] is the
//! production implementation, backed by `minijinja` and its parser.

use std::collections::BTreeSet;
use std::path::PathBuf;

use minijinja::machinery::{self, WhitespaceConfig};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment};
use thiserror::Error;
use tracing::debug;

use super::tree::ParsedTemplate;
use crate::config::RenderConfig;
use crate::context::Context;

/// Names the engine provides itself; never reported as free variables.
const ENGINE_BUILTINS: &[&str] = &[
    "range",
    "dict",
    "namespace",
    "debug",
    "loop",
    "self",
    "super",
    "caller",
    "varargs",
    "kwargs",
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub trait TemplateEngine {
    /// Validate `source` and build its syntax tree.
    fn parse<'s>(&self, name: &'s str, source: &'s str) -> Result<ParsedTemplate<'s>, RenderError>;

    /// Names referenced by the template that it does not bind itself.
    fn free_variables(&self, template: &ParsedTemplate<'_>) -> Result<BTreeSet<String>, RenderError>;

    fn render(&self, template: &ParsedTemplate<'_>, ctx: &Context) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, Default)]
pub struct JinjaEngine {
    config: RenderConfig,
    /// Directory `include`/`extends`/`import` are resolved against.
    search_dir: Option<PathBuf>,
}

impl JinjaEngine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config, search_dir: None }
    }

    #[must_use]
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = Some(dir.into());
        self
    }

    fn whitespace(&self) -> WhitespaceConfig {
        WhitespaceConfig {
            keep_trailing_newline: self.config.keep_trailing_newline,
            lstrip_blocks: self.config.lstrip_blocks,
            trim_blocks: self.config.trim_blocks,
        }
    }

    fn environment<'s>(&self) -> Environment<'s> {
        let mut env = Environment::new();
        env.set_trim_blocks(self.config.trim_blocks);
        env.set_lstrip_blocks(self.config.lstrip_blocks);
        env.set_keep_trailing_newline(self.config.keep_trailing_newline);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        if let Some(dir) = &self.search_dir {
            env.set_loader(minijinja::path_loader(dir));
        }
        env
    }
}

impl TemplateEngine for JinjaEngine {
    fn parse<'s>(&self, name: &'s str, source: &'s str) -> Result<ParsedTemplate<'s>, RenderError> {
        // Compiling catches errors the parser alone lets through.
        let mut env = self.environment();
        env.add_template(name, source)?;
        let root = machinery::parse(source, name, SyntaxConfig::default(), self.whitespace())?;
        Ok(ParsedTemplate { name, source, root })
    }

    fn free_variables(&self, template: &ParsedTemplate<'_>) -> Result<BTreeSet<String>, RenderError> {
        let mut env = self.environment();
        env.add_template(template.name, template.source)?;
        let compiled = env.get_template(template.name)?;

        let names: BTreeSet<String> = compiled
            .undeclared_variables(false)
            .into_iter()
            .filter(|name| !ENGINE_BUILTINS.contains(&name.as_str()))
            .collect();
        debug!(template = %template.name, count = names.len(), "found free variables");
        Ok(names)
    }

    fn render(&self, template: &ParsedTemplate<'_>, ctx: &Context) -> Result<String, RenderError> {
        let mut env = self.environment();
        env.add_template(template.name, template.source)?;
        let compiled = env.get_template(template.name)?;
        Ok(compiled.render(ctx)?)
    }
}
