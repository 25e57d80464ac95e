//! Variable metadata types.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping of variable name to the literal found in a `default(...)` filter.
pub type DefaultMap = BTreeMap<String, Value>;

/// Declared type of a template variable.
///
/// Parsed leniently from the `type` key of a header declaration:
///
/// ```yaml
/// vars:
///   port:
///     type: int
///   dns_servers:
///     type: list-of-ip
/// ```
///
/// Names the tool does not know are kept as [`TypeTag::Unknown`] and coerced
/// like plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TypeTag {
    #[default]
    Str,
    Int,
    Bool,
    Ip,
    Cidr,
    List,
    /// `list-of-<item>`; items are still split as strings.
    ListOf(String),
    Unknown(String),
}

impl TypeTag {
    pub fn parse(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "" | "str" | "string" => TypeTag::Str,
            "int" | "integer" => TypeTag::Int,
            "bool" | "boolean" => TypeTag::Bool,
            "ip" => TypeTag::Ip,
            "cidr" => TypeTag::Cidr,
            "list" => TypeTag::List,
            other => match other
                .strip_prefix("list")
                .filter(|rest| rest.starts_with(['-', '_', '[']))
            {
                Some(rest) => {
                    let item = rest
                        .trim_start_matches(['-', '_'])
                        .trim_start_matches("of")
                        .trim_start_matches(['-', '_', '['])
                        .trim_end_matches(']');
                    if item.is_empty() {
                        TypeTag::List
                    } else {
                        TypeTag::ListOf(item.to_string())
                    }
                }
                None => TypeTag::Unknown(other.to_string()),
            },
        }
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        TypeTag::parse(&s)
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        TypeTag::parse(s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Str => f.write_str("str"),
            TypeTag::Int => f.write_str("int"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Ip => f.write_str("ip"),
            TypeTag::Cidr => f.write_str("cidr"),
            TypeTag::List => f.write_str("list"),
            TypeTag::ListOf(item) => write!(f, "list-of-{item}"),
            TypeTag::Unknown(name) => f.write_str(name),
        }
    }
}

/// A variable described in the template header.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredVar {
    pub name: String,
    pub description: String,
    pub type_tag: TypeTag,
    pub required: bool,
    pub default: Option<Value>,
    pub example: Option<String>,
}

impl DeclaredVar {
    /// A declaration carrying only the name; everything else takes its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            type_tag: TypeTag::Str,
            required: false,
            default: None,
            example: None,
        }
    }
}

/// A variable of a template without a header.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedVar {
    pub name: String,
    /// Literal taken from a `default(...)` filter, if any.
    pub default: Option<Value>,
}

impl SynthesizedVar {
    pub fn new(name: impl Into<String>, default: Option<Value>) -> Self {
        Self { name: name.into(), default }
    }
}

/// Metadata for a single variable, either declared in the header or
/// synthesized from the template body.
///
/// Declared variables are prompted with their description and coerced with
/// their declared type. Synthesized variables get a minimal prompt and go
/// through type inference.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableMetadata {
    Declared(DeclaredVar),
    Synthesized(SynthesizedVar),
}

impl VariableMetadata {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            VariableMetadata::Declared(d) => &d.name,
            VariableMetadata::Synthesized(s) => &s.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            VariableMetadata::Declared(d) => &d.description,
            VariableMetadata::Synthesized(_) => "",
        }
    }

    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            VariableMetadata::Declared(d) => d.type_tag.clone(),
            VariableMetadata::Synthesized(_) => TypeTag::Str,
        }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        match self {
            VariableMetadata::Declared(d) => d.required,
            VariableMetadata::Synthesized(_) => false,
        }
    }

    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        match self {
            VariableMetadata::Declared(d) => d.default.as_ref(),
            VariableMetadata::Synthesized(s) => s.default.as_ref(),
        }
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        match self {
            VariableMetadata::Declared(d) => d.example.as_deref(),
            VariableMetadata::Synthesized(_) => None,
        }
    }

    #[must_use]
    pub fn is_declared(&self) -> bool {
        matches!(self, VariableMetadata::Declared(_))
    }
}

/// Ordered, duplicate-free set of variables for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedVariableSet {
    vars: Vec<VariableMetadata>,
}

impl ResolvedVariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variable. Returns `false` (and keeps the first entry) when the
    /// name is already present.
    pub fn push(&mut self, meta: VariableMetadata) -> bool {
        if self.contains(meta.name()) {
            return false;
        }
        self.vars.push(meta);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableMetadata> {
        self.vars.iter().find(|v| v.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableMetadata> {
        self.vars.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(VariableMetadata::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedVariableSet {
    type Item = &'a VariableMetadata;
    type IntoIter = std::slice::Iter<'a, VariableMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
