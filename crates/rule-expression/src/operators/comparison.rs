//! Comparison operators. Operands are compared as-is; no numeric coercion is
//! assumed up front.

use super::ComparisonFn;
use crate::types::Value;
use crate::util;

fn eq(a: &Value, b: &Value) -> bool {
    util::loose_eq(a, b)
}

fn ne(a: &Value, b: &Value) -> bool {
    !util::loose_eq(a, b)
}

fn strict_eq(a: &Value, b: &Value) -> bool {
    util::strict_eq(a, b)
}

fn strict_ne(a: &Value, b: &Value) -> bool {
    !util::strict_eq(a, b)
}

pub fn operators() -> Vec<(&'static str, ComparisonFn)> {
    vec![
        ("==", eq as ComparisonFn),
        ("!=", ne as ComparisonFn),
        ("===", strict_eq as ComparisonFn),
        ("!==", strict_ne as ComparisonFn),
        ("<", util::lt as ComparisonFn),
        (">", util::gt as ComparisonFn),
        ("<=", util::le as ComparisonFn),
        (">=", util::ge as ComparisonFn),
    ]
}
