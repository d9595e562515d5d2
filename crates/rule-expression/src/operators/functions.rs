//! Whitelisted math functions. Every argument has already been coerced to a
//! number and the argument count checked against the arity.

use crate::types::{Arity, FunctionDefinition, FunctionFn};
use std::sync::Arc;

fn abs(args: &[f64]) -> f64 {
    args[0].abs()
}

fn ceil(args: &[f64]) -> f64 {
    args[0].ceil()
}

fn floor(args: &[f64]) -> f64 {
    args[0].floor()
}

/// Halves round towards positive infinity: `round(-2.5) == -2`.
fn round(args: &[f64]) -> f64 {
    let x = args[0];
    let f = x.floor();
    if x - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

fn trunc(args: &[f64]) -> f64 {
    args[0].trunc()
}

fn sign(args: &[f64]) -> f64 {
    let x = args[0];
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

fn sqrt(args: &[f64]) -> f64 {
    args[0].sqrt()
}

fn cbrt(args: &[f64]) -> f64 {
    args[0].cbrt()
}

fn exp(args: &[f64]) -> f64 {
    args[0].exp()
}

fn log(args: &[f64]) -> f64 {
    args[0].ln()
}

fn log10(args: &[f64]) -> f64 {
    args[0].log10()
}

fn log2(args: &[f64]) -> f64 {
    args[0].log2()
}

fn pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

fn sin(args: &[f64]) -> f64 {
    args[0].sin()
}

fn cos(args: &[f64]) -> f64 {
    args[0].cos()
}

fn tan(args: &[f64]) -> f64 {
    args[0].tan()
}

// `f64::min`/`f64::max` skip NaN; a NaN argument must poison the result.
fn min(args: &[f64]) -> f64 {
    args.iter()
        .try_fold(f64::INFINITY, |acc, &x| if x.is_nan() { None } else { Some(acc.min(x)) })
        .unwrap_or(f64::NAN)
}

fn max(args: &[f64]) -> f64 {
    args.iter()
        .try_fold(f64::NEG_INFINITY, |acc, &x| if x.is_nan() { None } else { Some(acc.max(x)) })
        .unwrap_or(f64::NAN)
}

fn unary(
    name: &'static str,
    aliases: &'static [&'static str],
    eval_fn: FunctionFn,
) -> Arc<FunctionDefinition> {
    Arc::new(FunctionDefinition {
        name,
        aliases,
        arity: Arity::Fixed(1),
        eval_fn,
    })
}

pub fn functions() -> Vec<Arc<FunctionDefinition>> {
    vec![
        unary("abs", &[], abs),
        unary("ceil", &[], ceil),
        unary("floor", &[], floor),
        unary("round", &[], round),
        unary("trunc", &[], trunc),
        unary("sign", &[], sign),
        unary("sqrt", &[], sqrt),
        unary("cbrt", &[], cbrt),
        unary("exp", &[], exp),
        unary("log", &["ln"], log),
        unary("log10", &[], log10),
        unary("log2", &[], log2),
        unary("sin", &[], sin),
        unary("cos", &[], cos),
        unary("tan", &[], tan),
        Arc::new(FunctionDefinition {
            name: "pow",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: pow,
        }),
        Arc::new(FunctionDefinition {
            name: "min",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: min,
        }),
        Arc::new(FunctionDefinition {
            name: "max",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: max,
        }),
    ]
}
