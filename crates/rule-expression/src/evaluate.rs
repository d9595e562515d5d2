//! The recursive slice evaluator.
//!
//! A token slice is reduced by trying a fixed list of rules and applying the
//! first one that matches the whole slice: logical, comparison, additive and
//! multiplicative splits, then grouping, function calls, array indexing,
//! unary `!` and `-`, and finally single-token literals and variables.

use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::lexer::{Op, Token};
use crate::options::Precedence;
use crate::types::{assert_arity, Value};
use crate::util;
use regex::Regex;
use std::sync::OnceLock;

const LOGICAL: &[Op] = &[Op::And, Op::Or];
const COMPARISON: &[Op] = &[
    Op::Eq,
    Op::Ne,
    Op::StrictEq,
    Op::StrictNe,
    Op::Lt,
    Op::Gt,
    Op::Le,
    Op::Ge,
];
const ADDITIVE: &[Op] = &[Op::Plus, Op::Minus];
const MULTIPLICATIVE: &[Op] = &[Op::Star, Op::Slash, Op::Percent];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    LeftToRight,
    RightToLeft,
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\d+\.?\d*|\.\d+)$").expect("number pattern must compile"))
}

/// Evaluates a token slice against `ctx`.
///
/// Every nested call counts against the context's depth limit.
pub fn evaluate(tokens: &[Token], ctx: &EvalCtx<'_>) -> Result<Value, ExprError> {
    ctx.enter()?;
    let result = reduce(tokens, ctx);
    ctx.leave();
    result
}

fn reduce(tokens: &[Token], ctx: &EvalCtx<'_>) -> Result<Value, ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::InvalidExpression("empty expression".to_string()));
    }

    if let Some(value) = logical_split(tokens, ctx)? {
        return Ok(value);
    }

    if let Some(idx) = find_split(tokens, COMPARISON, Scan::RightToLeft, ctx) {
        let op = split_op(tokens, idx)?;
        let cmp = ctx
            .registry
            .comparison(op.symbol())
            .ok_or_else(|| unsupported(op))?;
        let left = evaluate(&tokens[..idx], ctx)?;
        let right = evaluate(&tokens[idx + 1..], ctx)?;
        return Ok(Value::Bool(cmp(&left, &right)));
    }

    let arithmetic_scan = match ctx.precedence {
        Precedence::Conventional => Scan::RightToLeft,
        Precedence::Legacy => Scan::LeftToRight,
    };
    for ops in [ADDITIVE, MULTIPLICATIVE] {
        if let Some(idx) = find_split(tokens, ops, arithmetic_scan, ctx) {
            let op = split_op(tokens, idx)?;
            let apply = ctx
                .registry
                .arithmetic(op.symbol())
                .ok_or_else(|| unsupported(op))?;
            let left = util::to_number(&evaluate(&tokens[..idx], ctx)?);
            let right = util::to_number(&evaluate(&tokens[idx + 1..], ctx)?);
            return Ok(Value::Number(apply(left, right)));
        }
    }

    let last = tokens.len() - 1;

    if tokens[0].is_op(Op::LParen) && tokens[last].is_op(Op::RParen) && encloses(tokens, 0, ctx) {
        return evaluate(&tokens[1..last], ctx);
    }

    if let Token::Ident(name) = &tokens[0] {
        let shaped = |open: Op, close: Op| {
            tokens.len() >= 3
                && tokens[1].is_op(open)
                && tokens[last].is_op(close)
                && encloses(tokens, 1, ctx)
        };
        if shaped(Op::LParen, Op::RParen) {
            return call(name, &tokens[2..last], ctx);
        }
        if shaped(Op::LBracket, Op::RBracket) {
            return index(name, &tokens[2..last], ctx);
        }
    }

    if tokens[0].is_op(Op::Bang) {
        let value = evaluate(&tokens[1..], ctx)?;
        return Ok(Value::Bool(!util::is_truthy(&value)));
    }

    if tokens[0].is_op(Op::Minus) {
        let value = evaluate(&tokens[1..], ctx)?;
        return Ok(Value::Number(-util::to_number(&value)));
    }

    if tokens.len() == 1 {
        return literal(&tokens[0], ctx);
    }

    Err(invalid(tokens))
}

/// Conventional precedence splits on `||` before `&&`; legacy
/// precedence treats both as one level.
fn logical_split(tokens: &[Token], ctx: &EvalCtx<'_>) -> Result<Option<Value>, ExprError> {
    let idx = match ctx.precedence {
        Precedence::Conventional => find_split(tokens, &[Op::Or], Scan::RightToLeft, ctx)
            .or_else(|| find_split(tokens, &[Op::And], Scan::RightToLeft, ctx)),
        Precedence::Legacy => find_split(tokens, LOGICAL, Scan::RightToLeft, ctx),
    };
    let Some(idx) = idx else {
        return Ok(None);
    };
    let op = split_op(tokens, idx)?;
    let combine = ctx
        .registry
        .logical(op.symbol())
        .ok_or_else(|| unsupported(op))?;
    // Both sides are evaluated so that an error on either side fails the whole
    // condition, regardless of the other side's value.
    let left = util::is_truthy(&evaluate(&tokens[..idx], ctx)?);
    let right = util::is_truthy(&evaluate(&tokens[idx + 1..], ctx)?);
    Ok(Some(Value::Bool(combine(left, right))))
}

/// Finds the operator to split on. With depth tracking only tokens outside
/// any `()`/`[]` are candidates. `+` and `-` only count in binary position.
fn find_split(tokens: &[Token], ops: &[Op], scan: Scan, ctx: &EvalCtx<'_>) -> Option<usize> {
    let depth_aware = ctx.depth_aware();
    let mut depth: i32 = 0;
    let mut found = None;
    for (i, token) in tokens.iter().enumerate() {
        match token.op() {
            Some(Op::LParen | Op::LBracket) => depth += 1,
            Some(Op::RParen | Op::RBracket) => depth -= 1,
            Some(op) if ops.contains(&op) => {
                if depth_aware && depth != 0 {
                    continue;
                }
                if matches!(op, Op::Plus | Op::Minus) && !in_binary_position(tokens, i) {
                    continue;
                }
                found = Some(i);
                if scan == Scan::LeftToRight {
                    break;
                }
            }
            _ => {}
        }
    }
    if let Some(idx) = found {
        tracing::trace!(op = %tokens[idx], at = idx, len = tokens.len(), "split");
    }
    found
}

fn in_binary_position(tokens: &[Token], i: usize) -> bool {
    i > 0 && tokens[i - 1].ends_operand()
}

fn split_op(tokens: &[Token], idx: usize) -> Result<Op, ExprError> {
    tokens[idx].op().ok_or_else(|| invalid(tokens))
}

/// True when the bracket at `open` is closed by the last token of the slice.
/// Legacy precedence never checks pairing.
fn encloses(tokens: &[Token], open: usize, ctx: &EvalCtx<'_>) -> bool {
    if !ctx.depth_aware() {
        return true;
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.op() {
            Some(Op::LParen | Op::LBracket) => depth += 1,
            Some(Op::RParen | Op::RBracket) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == tokens.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// `name(arg, ...)`: every argument is coerced to a number.
fn call(name: &str, args: &[Token], ctx: &EvalCtx<'_>) -> Result<Value, ExprError> {
    let def = ctx
        .registry
        .function(name)
        .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;
    let values = split_args(args)
        .into_iter()
        .map(|arg| evaluate(arg, ctx).map(|v| util::to_number(&v)))
        .collect::<Result<Vec<f64>, ExprError>>()?;
    assert_arity(def.name, &def.arity, values.len())?;
    Ok(Value::Number((def.eval_fn)(&values)))
}

/// Splits call arguments on commas that are not nested in brackets.
fn split_args(tokens: &[Token]) -> Vec<&[Token]> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut args = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.op() {
            Some(Op::LParen | Op::LBracket) => depth += 1,
            Some(Op::RParen | Op::RBracket) => depth -= 1,
            Some(Op::Comma) if depth == 0 => {
                args.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(&tokens[start..]);
    args
}

/// `name[index]`. Indices that are not in range yield `undefined`.
fn index(name: &str, position: &[Token], ctx: &EvalCtx<'_>) -> Result<Value, ExprError> {
    let bound = ctx
        .context
        .get(name)
        .ok_or_else(|| ExprError::UnknownVariable(name.to_string()))?;
    let items = bound.as_array().ok_or_else(|| ExprError::NotAnArray {
        name: name.to_string(),
        found: bound.type_name(),
    })?;
    let idx = util::to_number(&evaluate(position, ctx)?);
    Ok(util::to_index(idx)
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or(Value::Undefined))
}

/// A single token: number, string, keyword, constant, then variable.
fn literal(token: &Token, ctx: &EvalCtx<'_>) -> Result<Value, ExprError> {
    let name = match token {
        Token::Number(text) if number_regex().is_match(text) => {
            return text
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| ExprError::InvalidExpression(text.clone()));
        }
        Token::Number(text) => text.as_str(),
        Token::Str(text) => return Ok(Value::String(text.clone())),
        Token::Ident(name) => name.as_str(),
        Token::Op(op) => return Err(ExprError::InvalidExpression(op.symbol().to_string())),
    };
    match name {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        "undefined" => return Ok(Value::Undefined),
        _ => {}
    }
    if let Some(n) = ctx.registry.constant(name) {
        return Ok(Value::Number(n));
    }
    ctx.context
        .get(name)
        .cloned()
        .ok_or_else(|| ExprError::UnknownVariable(name.to_string()))
}

fn unsupported(op: Op) -> ExprError {
    ExprError::InvalidExpression(format!("unsupported operator {}", op.symbol()))
}

fn invalid(tokens: &[Token]) -> ExprError {
    let text = tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    ExprError::InvalidExpression(text)
}
