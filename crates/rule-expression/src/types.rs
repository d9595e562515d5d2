use crate::error::ExprError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A runtime value seen by an expression.
///
/// Unlike `serde_json::Value`, numbers are plain `f64` so that NaN produced by
/// division by zero can flow into later comparisons.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// A binding that exists but holds no value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Structural equality; `NaN` is never equal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(_) => f.write_str("[object]"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Function arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Fixed(usize),
    /// Between `min` and `max` arguments. `None` for max = unlimited.
    Range(usize, Option<usize>),
}

/// The numeric body of a whitelisted math function.
pub type FunctionFn = fn(&[f64]) -> f64;

/// A whitelisted math function.
pub struct FunctionDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub eval_fn: FunctionFn,
}

/// Map of function name/alias -> definition.
pub type FunctionMap = HashMap<&'static str, Arc<FunctionDefinition>>;

/// Asserts that a call passes an acceptable number of arguments.
pub fn assert_arity(name: &str, arity: &Arity, argc: usize) -> Result<(), ExprError> {
    match arity {
        Arity::Fixed(n) => {
            if argc != *n {
                Err(ExprError::Arity(format!(
                    "\"{}\" expects {} argument(s), got {}.",
                    name, n, argc
                )))
            } else {
                Ok(())
            }
        }
        Arity::Range(min, max) => {
            if argc < *min {
                Err(ExprError::Arity(format!(
                    "\"{}\" expects at least {} argument(s).",
                    name, min
                )))
            } else if let Some(max) = max {
                if argc > *max {
                    return Err(ExprError::Arity(format!(
                        "\"{}\" expects at most {} argument(s).",
                        name, max
                    )));
                }
                Ok(())
            } else {
                Ok(())
            }
        }
    }
}

/// Builds a `FunctionMap` from a list of function definitions.
pub fn functions_to_map(functions: Vec<Arc<FunctionDefinition>>) -> FunctionMap {
    let mut map = HashMap::new();
    for def in functions {
        map.insert(def.name, Arc::clone(&def));
        for alias in def.aliases {
            map.insert(*alias, Arc::clone(&def));
        }
    }
    map
}
