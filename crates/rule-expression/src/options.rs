//! Evaluator configuration.

use serde::Deserialize;

/// Maximum accepted expression length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 500;
/// Maximum number of tokens an expression may produce.
pub const DEFAULT_MAX_TOKENS: usize = 100;
/// Maximum nesting of recursive evaluation steps.
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Upper bound applied to any configured `max_depth`.
pub const MAX_DEPTH_CEILING: usize = 256;
/// Number of characters of a failing expression copied into log events.
pub const DEFAULT_LOG_TRUNCATE_LEN: usize = 100;

/// How the evaluator picks the operator to split a token slice on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    /// Operators nested in `()`/`[]` are invisible to outer scans, `&&` binds
    /// tighter than `||`, and every binary operator is left-associative.
    #[default]
    Conventional,
    /// Scans see through brackets, `&&` and `||` share one level, and
    /// additive/multiplicative operators split on their leftmost occurrence.
    /// Kept so rules written against the original evaluator keep their meaning.
    Legacy,
}

/// Limits and behavior switches for an [`Evaluator`](crate::Evaluator).
///
/// Deserializes from a partial document; missing fields take their defaults:
///
/// ```
/// use rule_expression::{EvaluatorOptions, Precedence};
///
/// let options: EvaluatorOptions =
///     serde_json::from_str(r#"{"max_tokens": 40, "precedence": "legacy"}"#).unwrap();
/// assert_eq!(options.max_tokens, 40);
/// assert_eq!(options.max_length, 500);
/// assert_eq!(options.precedence, Precedence::Legacy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvaluatorOptions {
    pub max_length: usize,
    pub max_tokens: usize,
    /// Clamped to [`MAX_DEPTH_CEILING`] regardless of configuration.
    pub max_depth: usize,
    pub log_truncate_len: usize,
    pub precedence: Precedence,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        EvaluatorOptions {
            max_length: DEFAULT_MAX_LENGTH,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_depth: DEFAULT_MAX_DEPTH,
            log_truncate_len: DEFAULT_LOG_TRUNCATE_LEN,
            precedence: Precedence::Conventional,
        }
    }
}

impl EvaluatorOptions {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_log_truncate_len(mut self, len: usize) -> Self {
        self.log_truncate_len = len;
        self
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }
}
