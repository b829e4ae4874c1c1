//! Typed field lookup over untyped rows.
//!
//! Each canonical field is described by an ordered alias list. The first
//! alias present in the row with a non-null value wins; later aliases are
//! not consulted even when the winning value fails to coerce.

use serde_json::{Map, Value};

/// A result row exactly as the data source returned it
pub type RawRow = Map<String, Value>;

/// Conversion from a JSON value into a canonical field type.
pub trait Coerce: Sized {
    /// `None` when the value has the wrong shape or is not finite
    fn coerce(value: &Value) -> Option<Self>;

    /// Value used when a matched field fails to coerce. `None` means the
    /// caller's fallback is used instead.
    fn invalid_default() -> Option<Self> {
        None
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => parse_number(s),
            _ => None,
        }
    }

    fn invalid_default() -> Option<Self> {
        Some(0.0)
    }
}

impl Coerce for u64 {
    fn coerce(value: &Value) -> Option<Self> {
        if let Value::Number(n) = value {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
        }
        // Negative counts are data errors; clamp them to zero
        f64::coerce(value).map(|v| if v > 0.0 { v.round() as u64 } else { 0 })
    }

    fn invalid_default() -> Option<Self> {
        Some(0)
    }
}

impl Coerce for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        if let Value::Number(n) = value {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
        }
        f64::coerce(value).map(|v| v.round() as i64)
    }

    fn invalid_default() -> Option<Self> {
        Some(0)
    }
}

impl Coerce for String {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(number_to_string(n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => String::new(),
    }
}

/// First alias present in `row` with a non-null value.
pub fn lookup<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| !v.is_null())
}

/// True when any alias carries a non-null value.
pub fn has_any(row: &RawRow, keys: &[&str]) -> bool {
    lookup(row, keys).is_some()
}

/// Resolve a field; missing → `fallback`, present but invalid → the type's
/// zero (numbers) or `fallback` (strings).
pub fn resolve<T: Coerce>(row: &RawRow, keys: &[&str], fallback: T) -> T {
    match lookup(row, keys) {
        None => fallback,
        Some(value) => match T::coerce(value) {
            Some(v) => v,
            None => T::invalid_default().unwrap_or(fallback),
        },
    }
}

/// Resolve a field where "absent" must stay distinguishable from zero:
/// missing and invalid both yield `None`.
pub fn resolve_strict<T: Coerce>(row: &RawRow, keys: &[&str]) -> Option<T> {
    lookup(row, keys).and_then(T::coerce)
}

pub fn number(row: &RawRow, keys: &[&str]) -> f64 {
    resolve(row, keys, 0.0)
}

pub fn number_or_none(row: &RawRow, keys: &[&str]) -> Option<f64> {
    resolve_strict(row, keys)
}

pub fn count(row: &RawRow, keys: &[&str]) -> u64 {
    resolve(row, keys, 0u64)
}

pub fn integer(row: &RawRow, keys: &[&str]) -> i64 {
    resolve(row, keys, 0i64)
}

pub fn text(row: &RawRow, keys: &[&str]) -> String {
    resolve(row, keys, String::new())
}

/// Text field where an empty string counts as absent
pub fn text_or_none(row: &RawRow, keys: &[&str]) -> Option<String> {
    resolve_strict::<String>(row, keys).filter(|s| !s.is_empty())
}
