//! Header document types.

use serde::Deserialize;

use crate::vars::{DeclaredVar, TypeTag};

/// Parsed header: declared variables in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderDoc {
    pub vars: Vec<DeclaredVar>,
}

/// One entry under `vars:` as written in YAML.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VarDecl {
    /// Text shown when prompting.
    #[serde(default, alias = "description")]
    pub desc: String,

    #[serde(default, rename = "type")]
    pub type_tag: TypeTag,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default: Option<serde_yaml::Value>,

    /// Sample value, shown next to the prompt.
    #[serde(default)]
    pub example: Option<serde_yaml::Value>,
}
