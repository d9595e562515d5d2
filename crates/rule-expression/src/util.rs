//! Value coercion helpers shared by the operators and the evaluator.

use crate::types::Value;
use std::cmp::Ordering;

// ----------------------------------------------------------------- Conversions

/// Converts a value to a number the way rule authors expect from scripting
/// languages: booleans become 0/1, `null` is 0, numeric strings parse, and
/// everything else is NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Interprets `n` as an array index; fractional, negative and non-finite
/// values are not indices.
pub fn to_index(n: f64) -> Option<usize> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 {
        Some(n as usize)
    } else {
        None
    }
}

// -------------------------------------------------------------- Equality

/// `===`: same type and same value.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    a == b
}

/// `==`: `null` and `undefined` equal each other, and mixed
/// number/string/boolean operands are compared numerically.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Number(_), Value::String(_) | Value::Bool(_))
        | (Value::String(_), Value::Number(_) | Value::Bool(_))
        | (Value::Bool(_), Value::Number(_) | Value::String(_)) => to_number(a) == to_number(b),
        _ => strict_eq(a, b),
    }
}

// -------------------------------------------------------------- Ordering

/// Orders two values: strings lexicographically, everything else by numeric
/// coercion. Returns `None` when either side is NaN.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => Some(sa.cmp(sb)),
        _ => to_number(a).partial_cmp(&to_number(b)),
    }
}

pub fn lt(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

pub fn gt(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

pub fn le(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Less | Ordering::Equal))
}

pub fn ge(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Greater | Ordering::Equal))
}

// -------------------------------------------------------------- Diagnostics

/// Returns at most `max` characters of `s`, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
