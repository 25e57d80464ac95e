//! Conversion of raw text input into typed values.
//!
//! Two entry points:
//! - [`coerce`] for variables with a declared [`TypeTag`]
//! - [`infer`] for undescribed variables, which guesses the type from the text
//!
//! Inference applies its rules in a fixed order; the first one that matches
//! decides the type:
//!
//! 1. empty input is absent
//! 2. `:json <doc>`, `:list a,b`, `:dict k=v k2=v2` force a structured parse
//! 3. `true/false/yes/no/on/off` (any case) become booleans
//! 4. digits become integers
//! 5. `digits.digits` become floats
//! 6. anything with a comma becomes a list
//! 7. `[...]` / `{...}` are tried as JSON, falling back to the raw text
//! 8. everything else stays a string

use serde_json::{Map, Number, Value};
use std::net::IpAddr;
use thiserror::Error;

use super::types::TypeTag;

/// Tokens accepted as `true` by the `bool` type. Everything else is `false`.
const TRUTHY: &[&str] = &["true", "yes", "y", "1", "on"];

/// Tokens recognised as booleans during inference.
const INFER_BOOL: &[&str] = &["true", "false", "yes", "no", "on", "off"];
const INFER_TRUE: &[&str] = &["true", "yes", "on"];

const JSON_PREFIX: &str = ":json ";
const LIST_PREFIX: &str = ":list ";
const DICT_PREFIX: &str = ":dict ";

/// Error produced when input does not fit the requested type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("invalid integer: '{0}'")]
    InvalidInt(String),

    #[error("invalid IP address: '{0}'")]
    InvalidIp(String),

    #[error("invalid CIDR network: '{0}'")]
    InvalidCidr(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("invalid dict entry '{0}' (expected key=value)")]
    InvalidDict(String),
}

/// Coerce `raw` according to a declared type.
///
/// Input is trimmed first. `str` keeps the empty string as an explicit empty
/// value; callers that want "empty means absent" must check before calling.
pub fn coerce(raw: &str, tag: &TypeTag) -> Result<Value, CoercionError> {
    let value = raw.trim();
    match tag {
        TypeTag::Str | TypeTag::Unknown(_) => Ok(Value::String(value.to_string())),
        TypeTag::Int => value
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| CoercionError::InvalidInt(value.to_string())),
        TypeTag::Bool => Ok(Value::Bool(is_truthy(value))),
        TypeTag::Ip => value
            .parse::<IpAddr>()
            .map(|ip| Value::String(ip.to_string()))
            .map_err(|_| CoercionError::InvalidIp(value.to_string())),
        TypeTag::Cidr => parse_cidr(value).map(Value::String),
        TypeTag::List | TypeTag::ListOf(_) => Ok(split_list(value)),
    }
}

/// Infer a typed value from free-form input.
///
/// Returns `Ok(None)` for empty input. Only the forced prefixes can fail; a
/// bracketed value that is not valid JSON is kept as text.
pub fn infer(raw: &str) -> Result<Option<Value>, CoercionError> {
    let value = raw.trim();

    if value.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = value.strip_prefix(JSON_PREFIX) {
        return parse_json(rest.trim()).map(Some);
    }
    if let Some(rest) = value.strip_prefix(LIST_PREFIX) {
        return Ok(Some(split_list(rest)));
    }
    if let Some(rest) = value.strip_prefix(DICT_PREFIX) {
        return parse_dict(rest).map(Some);
    }

    let lower = value.to_lowercase();
    if INFER_BOOL.contains(&lower.as_str()) {
        return Ok(Some(Value::Bool(INFER_TRUE.contains(&lower.as_str()))));
    }

    if is_digits(value) {
        if let Ok(n) = value.parse::<i64>() {
            return Ok(Some(Value::from(n)));
        }
        // Too large for i64: leave it as text rather than lose precision.
        return Ok(Some(Value::String(value.to_string())));
    }

    if let Some((int_part, frac_part)) = value.split_once('.')
        && is_digits(int_part)
        && is_digits(frac_part)
        && let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64)
    {
        return Ok(Some(Value::Number(n)));
    }

    if value.contains(',') {
        return Ok(Some(split_list(value)));
    }

    if is_bracketed(value)
        && let Ok(parsed) = serde_json::from_str::<Value>(value)
    {
        return Ok(Some(parsed));
    }

    Ok(Some(Value::String(value.to_string())))
}

/// Case-insensitive membership in the truthy token set.
pub fn is_truthy(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    TRUTHY.contains(&lower.as_str())
}

/// Split on commas, trim each item and drop empty ones.
fn split_list(value: &str) -> Value {
    Value::Array(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect(),
    )
}

/// Parse `addr/prefix` (or a bare address, as a single-host network).
/// Returns the canonical `addr/prefix` text.
fn parse_cidr(value: &str) -> Result<String, CoercionError> {
    let err = || CoercionError::InvalidCidr(value.to_string());

    let (addr, prefix) = match value.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (value, None),
    };
    let addr: IpAddr = addr.parse().map_err(|_| err())?;
    let max = if addr.is_ipv4() { 32 } else { 128 };
    let prefix = match prefix {
        Some(p) if is_digits(p) => p.parse::<u8>().map_err(|_| err())?,
        Some(_) => return Err(err()),
        None => max,
    };
    if prefix > max {
        return Err(err());
    }

    // Host bits must be zero: 10.0.0.1/8 is an address, not a network.
    let bits = match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    };
    let host_bits = u32::from(max - prefix);
    let host_mask = 1u128.checked_shl(host_bits).map_or(u128::MAX, |m| m - 1);
    if bits & host_mask != 0 {
        return Err(err());
    }

    Ok(format!("{addr}/{prefix}"))
}

fn parse_json(value: &str) -> Result<Value, CoercionError> {
    serde_json::from_str(value).map_err(|e| CoercionError::InvalidJson(e.to_string()))
}

/// Parse whitespace separated `key=value` pairs into an object of strings.
fn parse_dict(value: &str) -> Result<Value, CoercionError> {
    let mut map = Map::new();
    for pair in value.split_whitespace() {
        let (key, val) = pair
            .split_once('=')
            .ok_or_else(|| CoercionError::InvalidDict(pair.to_string()))?;
        map.insert(key.to_string(), Value::String(val.to_string()));
    }
    Ok(Value::Object(map))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_bracketed(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}
