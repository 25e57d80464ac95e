//! Read-only walk over the template tree produced by `minijinja`'s parser.

use minijinja::machinery::ast::{CallArg, Expr, Stmt};

/// A template that passed the engine's parser, with its syntax tree.
///
/// Borrows the name and source it was parsed from.
#[derive(Debug)]
pub struct ParsedTemplate<'s> {
    pub name: &'s str,
    pub source: &'s str,
    pub root: Stmt<'s>,
}

impl<'s> ParsedTemplate<'s> {
    pub fn accept<V: Visitor<'s> + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_stmt(&self.root);
    }
}

/// Visitor over statements and expressions.
///
/// Override a `visit_*` method to look at nodes; call the matching `walk_*`
/// function from the override to keep descending.
pub trait Visitor<'s> {
    fn visit_stmt(&mut self, stmt: &Stmt<'s>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr<'s>) {
        walk_expr(self, expr);
    }
}

fn visit_body<'s, V: Visitor<'s> + ?Sized>(visitor: &mut V, body: &[Stmt<'s>]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

fn visit_args<'s, V: Visitor<'s> + ?Sized>(visitor: &mut V, args: &[CallArg<'s>]) {
    for arg in args {
        match arg {
            CallArg::Pos(e) | CallArg::Kwarg(_, e) | CallArg::PosSplat(e) | CallArg::KwargSplat(e) => {
                visitor.visit_expr(e);
            }
        }
    }
}

/// Visit the children of `stmt` in source order.
#[allow(clippy::match_wildcard_for_single_variants)]
pub fn walk_stmt<'s, V: Visitor<'s> + ?Sized>(visitor: &mut V, stmt: &Stmt<'s>) {
    match stmt {
        Stmt::Template(t) => visit_body(visitor, &t.children),
        Stmt::EmitExpr(e) => visitor.visit_expr(&e.expr),
        Stmt::ForLoop(f) => {
            visitor.visit_expr(&f.target);
            visitor.visit_expr(&f.iter);
            if let Some(filter) = &f.filter_expr {
                visitor.visit_expr(filter);
            }
            visit_body(visitor, &f.body);
            visit_body(visitor, &f.else_body);
        }
        Stmt::IfCond(c) => {
            visitor.visit_expr(&c.expr);
            visit_body(visitor, &c.true_body);
            visit_body(visitor, &c.false_body);
        }
        Stmt::WithBlock(w) => {
            for (target, value) in &w.assignments {
                visitor.visit_expr(target);
                visitor.visit_expr(value);
            }
            visit_body(visitor, &w.body);
        }
        Stmt::Set(s) => {
            visitor.visit_expr(&s.target);
            visitor.visit_expr(&s.expr);
        }
        Stmt::SetBlock(s) => {
            visitor.visit_expr(&s.target);
            if let Some(filter) = &s.filter {
                visitor.visit_expr(filter);
            }
            visit_body(visitor, &s.body);
        }
        Stmt::AutoEscape(a) => {
            visitor.visit_expr(&a.enabled);
            visit_body(visitor, &a.body);
        }
        Stmt::FilterBlock(f) => {
            visitor.visit_expr(&f.filter);
            visit_body(visitor, &f.body);
        }
        Stmt::Block(b) => visit_body(visitor, &b.body),
        Stmt::Import(i) => {
            visitor.visit_expr(&i.expr);
            visitor.visit_expr(&i.name);
        }
        Stmt::FromImport(i) => {
            visitor.visit_expr(&i.expr);
            for (name, alias) in &i.names {
                visitor.visit_expr(name);
                if let Some(alias) = alias {
                    visitor.visit_expr(alias);
                }
            }
        }
        Stmt::Extends(e) => visitor.visit_expr(&e.name),
        Stmt::Include(i) => visitor.visit_expr(&i.name),
        Stmt::Macro(m) => {
            for expr in m.args.iter().chain(&m.defaults) {
                visitor.visit_expr(expr);
            }
            visit_body(visitor, &m.body);
        }
        Stmt::CallBlock(c) => {
            visitor.visit_expr(&c.call.expr);
            visit_args(visitor, &c.call.args);
            visit_body(visitor, &c.macro_decl.body);
        }
        Stmt::Do(d) => {
            visitor.visit_expr(&d.call.expr);
            visit_args(visitor, &d.call.args);
        }
        // Raw text and loop controls carry no expressions.
        _ => {}
    }
}

/// Visit the sub-expressions of `expr` in source order.
pub fn walk_expr<'s, V: Visitor<'s> + ?Sized>(visitor: &mut V, expr: &Expr<'s>) {
    match expr {
        Expr::Var(_) | Expr::Const(_) => {}
        Expr::Slice(s) => {
            visitor.visit_expr(&s.expr);
            for part in [&s.start, &s.stop, &s.step].into_iter().flatten() {
                visitor.visit_expr(part);
            }
        }
        Expr::UnaryOp(u) => visitor.visit_expr(&u.expr),
        Expr::BinOp(b) => {
            visitor.visit_expr(&b.left);
            visitor.visit_expr(&b.right);
        }
        Expr::Compare(c) => {
            visitor.visit_expr(&c.expr);
            for op in &c.ops {
                visitor.visit_expr(&op.expr);
            }
        }
        Expr::IfExpr(i) => {
            visitor.visit_expr(&i.true_expr);
            visitor.visit_expr(&i.test_expr);
            if let Some(false_expr) = &i.false_expr {
                visitor.visit_expr(false_expr);
            }
        }
        Expr::Filter(f) => {
            if let Some(target) = &f.expr {
                visitor.visit_expr(target);
            }
            visit_args(visitor, &f.args);
        }
        Expr::Test(t) => {
            visitor.visit_expr(&t.expr);
            visit_args(visitor, &t.args);
        }
        Expr::GetAttr(g) => visitor.visit_expr(&g.expr),
        Expr::GetItem(g) => {
            visitor.visit_expr(&g.expr);
            visitor.visit_expr(&g.subscript_expr);
        }
        Expr::Call(c) => {
            visitor.visit_expr(&c.expr);
            visit_args(visitor, &c.args);
        }
        Expr::List(l) => {
            for item in &l.items {
                visitor.visit_expr(item);
            }
        }
        Expr::Map(m) => {
            for (key, value) in m.keys.iter().zip(&m.values) {
                visitor.visit_expr(key);
                visitor.visit_expr(value);
            }
        }
    }
}
