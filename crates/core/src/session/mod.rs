//! Interactive prompting session.
//!
//! Walks a [`ResolvedVariableSet`](crate::vars::ResolvedVariableSet) in order
//! and fills the render [`Context`](crate::context::Context). All operator
//! I/O goes through the [`Console`] trait.

mod console;
mod prompt;
mod report;

pub use console::{Console, LineConsole};
pub use prompt::{SessionError, SessionOptions, display_value, run_session};
pub use report::{SessionReport, VarState};
