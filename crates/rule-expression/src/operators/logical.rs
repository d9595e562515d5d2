//! Logical operators.

use super::LogicalFn;

fn and(a: bool, b: bool) -> bool {
    a && b
}

fn or(a: bool, b: bool) -> bool {
    a || b
}

pub fn operators() -> Vec<(&'static str, LogicalFn)> {
    vec![("&&", and as LogicalFn), ("||", or as LogicalFn)]
}
