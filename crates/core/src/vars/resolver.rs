//! Merge header declarations, scanned defaults and free variables.

use std::collections::BTreeSet;

use tracing::debug;

use super::types::{DeclaredVar, DefaultMap, ResolvedVariableSet, SynthesizedVar, VariableMetadata};
use crate::header::HeaderDoc;

/// Build the ordered variable set for one render pass.
///
/// With a header, declared variables come first in declaration order (even
/// the ones the template never references), followed by the remaining free
/// variables in lexicographic order. Those get a bare declaration (`str`,
/// optional, no default) so the whole template is prompted the same way.
///
/// Without a header every free variable is synthesized, lexicographically,
/// and picks up the literal found by the default scanner.
pub fn resolve(
    free_vars: &BTreeSet<String>,
    header: Option<&HeaderDoc>,
    scanned_defaults: &DefaultMap,
) -> ResolvedVariableSet {
    let mut resolved = ResolvedVariableSet::new();

    let Some(doc) = header else {
        // BTreeSet iteration is already lexicographic.
        for name in free_vars {
            let default = scanned_defaults.get(name).cloned();
            resolved.push(VariableMetadata::Synthesized(SynthesizedVar::new(name, default)));
        }
        return resolved;
    };

    for decl in &doc.vars {
        if !free_vars.contains(&decl.name) {
            debug!(name = %decl.name, "declared variable is not referenced by the template");
        }
        resolved.push(VariableMetadata::Declared(decl.clone()));
    }
    for name in free_vars {
        if !resolved.contains(name) {
            debug!(%name, "variable is not described in the header");
            resolved.push(VariableMetadata::Declared(DeclaredVar::new(name.as_str())));
        }
    }

    resolved
}
