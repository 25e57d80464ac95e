//! Variable metadata, coercion and resolution.
//!
//! This module covers:
//! - Metadata records for declared and synthesized variables
//! - Coercion of raw input, by declared type or by inference
//! - Merging header declarations with scanned defaults and free variables

pub mod coerce;
pub mod resolver;
pub mod types;

pub use coerce::{CoercionError, coerce, infer, is_truthy};
pub use resolver::resolve;
pub use types::{
    DeclaredVar, DefaultMap, ResolvedVariableSet, SynthesizedVar, TypeTag,
    VariableMetadata,
};
