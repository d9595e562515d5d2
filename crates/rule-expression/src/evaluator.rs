//! Top-level entry point: guard, tokenize, evaluate, coerce to a boolean.

use crate::context::Context;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::evaluate;
use crate::guard::guard;
use crate::lexer::{check_balanced, tokenize, Token};
use crate::options::{EvaluatorOptions, Precedence};
use crate::types::Value;
use crate::util;

/// Evaluates rule conditions under a fixed set of [`EvaluatorOptions`].
///
/// Holds no state besides its options; one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvaluatorOptions,
}

impl Evaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        Evaluator { options }
    }

    /// Evaluates `expression` to a boolean.
    ///
    /// Never fails: any rejection or evaluation error is logged at `warn`
    /// level and reported as `false`.
    pub fn evaluate(&self, expression: &str, context: &Context) -> bool {
        match self.try_evaluate(expression, context) {
            Ok(value) => {
                let result = util::is_truthy(&value);
                tracing::debug!(result, value = %value, "expression evaluated");
                result
            }
            Err(err) => {
                tracing::warn!(
                    kind = %err.kind(),
                    error = %err,
                    expression = %util::truncate(expression, self.options.log_truncate_len),
                    "expression evaluation failed"
                );
                false
            }
        }
    }

    /// Runs the same pipeline as [`evaluate`](Self::evaluate) but returns the
    /// raw value, or the error instead of `false`.
    pub fn try_evaluate(&self, expression: &str, context: &Context) -> Result<Value, ExprError> {
        let tokens = self.prepare(expression)?;
        let ctx = EvalCtx::new(context)
            .with_precedence(self.options.precedence)
            .with_max_depth(self.options.max_depth);
        evaluate(&tokens, &ctx)
    }

    /// Checks everything that can be checked without variable bindings:
    /// length, denylist, characters, token count and bracket pairing.
    pub fn validate(&self, expression: &str) -> Result<(), ExprError> {
        self.prepare(expression).map(|_| ())
    }

    fn prepare(&self, expression: &str) -> Result<Vec<Token>, ExprError> {
        guard(expression, &self.options)?;
        let tokens = tokenize(expression)?;
        if tokens.len() > self.options.max_tokens {
            return Err(ExprError::TooComplex {
                count: tokens.len(),
                max: self.options.max_tokens,
            });
        }
        if self.options.precedence == Precedence::Conventional {
            check_balanced(&tokens)?;
        }
        Ok(tokens)
    }
}
