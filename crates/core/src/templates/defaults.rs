//! Collects literal fallbacks from `default(...)` filters.
//!
//! Only `{{ name | default(<literal>) }}` is recognised: the filter must be
//! applied directly to a variable and its first positional argument must be
//! a constant. Anything else (`user.name | default(...)`,
//! `x | default(compute())`, `x | default(-1)`) is skipped. The first
//! occurrence of a variable in source order wins; a literal `none` counts as
//! no default.

use minijinja::machinery::ast::{CallArg, Expr};
use tracing::debug;

use super::tree::{ParsedTemplate, Visitor, walk_expr};
use crate::vars::DefaultMap;

const DEFAULT_FILTER: &str = "default";

/// Scan a parsed template for literal defaults.
pub fn scan_defaults(template: &ParsedTemplate<'_>) -> DefaultMap {
    let mut scanner = DefaultScanner::default();
    template.accept(&mut scanner);
    scanner.defaults
}

#[derive(Debug, Default)]
struct DefaultScanner {
    defaults: DefaultMap,
}

impl<'s> Visitor<'s> for DefaultScanner {
    fn visit_expr(&mut self, expr: &Expr<'s>) {
        if let Expr::Filter(filter) = expr
            && filter.name == DEFAULT_FILTER
            && let (Some(Expr::Var(var)), Some(CallArg::Pos(Expr::Const(literal)))) =
                (&filter.expr, filter.args.first())
            && !self.defaults.contains_key(var.id)
        {
            match serde_json::to_value(&literal.value) {
                Ok(value) if !value.is_null() => {
                    self.defaults.insert(var.id.to_string(), value);
                }
                Ok(_) => {}
                Err(e) => debug!(var = var.id, "skipping default literal: {e}"),
            }
        }
        walk_expr(self, expr);
    }
}
