//! Render context and its side-file persistence.
//!
//! A context file is a flat JSON object mapping variable names to values.
//! Entries loaded from it are never prompted for.

mod store;
mod types;

pub use store::{ContextError, load, save};
pub use types::Context;
