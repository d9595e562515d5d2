//! Binary arithmetic operators.

use super::ArithmeticFn;

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Division by zero is NaN rather than an infinity, so that any comparison
/// against the result is false.
fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        f64::NAN
    } else {
        a / b
    }
}

fn modulo(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        f64::NAN
    } else {
        a % b
    }
}

pub fn operators() -> Vec<(&'static str, ArithmeticFn)> {
    vec![
        ("+", add as ArithmeticFn),
        ("-", subtract as ArithmeticFn),
        ("*", multiply as ArithmeticFn),
        ("/", divide as ArithmeticFn),
        ("%", modulo as ArithmeticFn),
    ]
}
