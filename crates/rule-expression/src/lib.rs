//! Sandboxed evaluation of rule conditions.
//!
//! # Overview
//!
//! Rule conditions such as `price > threshold && count >= 3` arrive as
//! untrusted configuration text. This crate evaluates them with a small,
//! closed grammar: arithmetic, comparisons, `&&`/`||`/`!`, grouping, calls to
//! whitelisted math functions, named constants and single-level array
//! indexing. There is no assignment, no control flow, and no way to reach
//! anything outside the supplied [`Context`].
//!
//! Every failure is fail-closed: [`evaluate_expression`] returns `false` and
//! emits a `tracing` event instead of propagating an error.
//!
//! # Example
//!
//! ```
//! use rule_expression::{evaluate_expression, Context};
//! use serde_json::json;
//!
//! let ctx = Context::from_json(json!({"price": 120, "threshold": 100, "count": 3}));
//! assert!(evaluate_expression("price > threshold && count >= 3", &ctx));
//! assert!(!evaluate_expression("price > threshold && count >= 4", &ctx));
//! assert!(!evaluate_expression("eval('1')", &ctx));
//! ```

pub mod context;
pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod evaluator;
pub mod guard;
pub mod lexer;
pub mod operators;
pub mod options;
pub mod types;
pub mod util;

pub use context::Context;
pub use error::{ErrorKind, ExprError};
pub use eval_ctx::EvalCtx;
pub use evaluate::evaluate;
pub use evaluator::Evaluator;
pub use guard::guard;
pub use lexer::{tokenize, Op, Token};
pub use operators::{registry, Registry};
pub use options::{EvaluatorOptions, Precedence};
pub use types::{Arity, FunctionDefinition, Value};

/// Evaluates `expression` against `context` with default options.
///
/// Returns `false` for anything that cannot be evaluated; see
/// [`Evaluator::evaluate`].
pub fn evaluate_expression(expression: &str, context: &Context) -> bool {
    Evaluator::default().evaluate(expression, context)
}
