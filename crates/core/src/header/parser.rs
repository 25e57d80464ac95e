//! Header extraction from template sources.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{HeaderDoc, VarDecl};
use crate::vars::DeclaredVar;

/// `{#---` on its own line, the YAML body, then `---#}` on its own line.
/// Only leading whitespace may precede the block.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*\{#---[ \t]*\r?\n(?s:(.*?)\r?\n)?---#\}").expect("valid regex")
});

/// Errors that can occur while parsing a header body.
#[derive(Debug, Error)]
pub enum HeaderParseError {
    #[error("invalid YAML header: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("header variable names must be strings, got {0:?}")]
    InvalidName(Value),

    #[error("invalid declaration for '{name}': {source}")]
    InvalidVar {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("default for '{name}' cannot be used as a value: {source}")]
    InvalidDefault {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(default)]
    vars: Option<serde_yaml::Mapping>,
}

/// Return the body of the header block, if the template starts with one.
pub fn find_header_block(source: &str) -> Option<&str> {
    HEADER_RE
        .captures(source)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}

/// Extract the header from a template source.
///
/// A missing header is not an error. A header that fails to parse, or that
/// has no `vars` mapping, is logged as a warning and treated as missing.
pub fn extract(source: &str) -> Option<HeaderDoc> {
    let body = find_header_block(source)?;
    match parse_header(body) {
        Ok(Some(doc)) => {
            debug!(vars = doc.vars.len(), "found template header");
            Some(doc)
        }
        Ok(None) => {
            warn!("template header has no `vars` mapping; ignoring it");
            None
        }
        Err(e) => {
            warn!("ignoring template header: {e}");
            None
        }
    }
}

/// Parse a header body. Returns `Ok(None)` when the document has no `vars`.
pub fn parse_header(body: &str) -> Result<Option<HeaderDoc>, HeaderParseError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let raw: RawHeader = serde_yaml::from_str(body)?;
    let Some(vars) = raw.vars else {
        return Ok(None);
    };

    let mut doc = HeaderDoc::default();
    for (key, value) in vars {
        let name = match key {
            Value::String(s) => s,
            other => return Err(HeaderParseError::InvalidName(other)),
        };

        let decl: VarDecl = match value {
            Value::Null => VarDecl::default(),
            value => serde_yaml::from_value(value).map_err(|source| {
                HeaderParseError::InvalidVar { name: name.clone(), source }
            })?,
        };

        doc.vars.push(into_declared(name, decl)?);
    }

    Ok(Some(doc))
}

fn into_declared(name: String, decl: VarDecl) -> Result<DeclaredVar, HeaderParseError> {
    let default = match decl.default {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::to_value(value).map_err(|source| {
            HeaderParseError::InvalidDefault { name: name.clone(), source }
        })?),
    };

    let example = decl.example.and_then(|value| match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => serde_json::to_value(other).ok().map(|v: JsonValue| v.to_string()),
    });

    Ok(DeclaredVar {
        name,
        description: decl.desc,
        type_tag: decl.type_tag,
        required: decl.required,
        default,
        example,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::TypeTag;
    use serde_json::json;

    #[test]
    fn find_block_at_start() {
        let src = "{#---\nvars:\n  a: {}\n---#}\nHello {{ a }}";
        assert_eq!(find_header_block(src), Some("vars:\n  a: {}"));
    }

    #[test]
    fn find_block_allows_leading_whitespace() {
        let src = "\n  {#---\nvars: {}\n---#}\n";
        assert_eq!(find_header_block(src), Some("vars: {}"));
    }

    #[test]
    fn block_not_at_start_is_ignored() {
        let src = "Hello\n{#---\nvars:\n  a: {}\n---#}\n";
        assert_eq!(find_header_block(src), None);
    }

    #[test]
    fn empty_block_has_no_vars() {
        assert_eq!(find_header_block("{#---\n---#}"), Some(""));
        assert!(extract("{#---\n---#}").is_none());
    }

    #[test]
    fn parse_full_declaration() {
        let body = r#"
vars:
  port:
    desc: "SSH port"
    type: int
    required: true
    default: 22
    example: 2222
    color: blue
"#;
        let doc = parse_header(body).unwrap().unwrap();
        let port = &doc.vars[0];
        assert_eq!(port.name, "port");
        assert_eq!(port.description, "SSH port");
        assert_eq!(port.type_tag, TypeTag::Int);
        assert!(port.required);
        assert_eq!(port.default, Some(json!(22)));
        assert_eq!(port.example.as_deref(), Some("2222"));
    }

    #[test]
    fn parse_missing_keys_take_defaults() {
        let doc = parse_header("vars:\n  name:\n  other: {}\n").unwrap().unwrap();
        for var in &doc.vars {
            assert_eq!(var.type_tag, TypeTag::Str);
            assert!(!var.required);
            assert!(var.default.is_none());
            assert!(var.example.is_none());
            assert!(var.description.is_empty());
        }
    }

    #[test]
    fn parse_keeps_declaration_order() {
        let doc = parse_header("vars:\n  zulu: {}\n  alpha: {}\n  mike: {}\n")
            .unwrap()
            .unwrap();
        let names: Vec<_> = doc.vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn malformed_yaml_is_an_error_but_extract_degrades() {
        assert!(parse_header("vars: [unclosed").is_err());
        assert!(extract("{#---\nvars: [unclosed\n---#}\n{{ x }}").is_none());
    }

    #[test]
    fn document_without_vars_is_absent() {
        assert!(parse_header("title: something\n").unwrap().is_none());
    }
}
