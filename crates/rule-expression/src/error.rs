use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`ExprError`], reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RejectedByGuard,
    Lexical,
    TooComplex,
    UnknownIdentifier,
    Structural,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RejectedByGuard => "rejected_by_guard",
            ErrorKind::Lexical => "lexical",
            ErrorKind::TooComplex => "too_complex",
            ErrorKind::UnknownIdentifier => "unknown_identifier",
            ErrorKind::Structural => "structural",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("expression too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("expression rejected: {rule}")]
    Denied { rule: &'static str },

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("expression too complex: {count} tokens (max {max})")]
    TooComplex { count: usize, max: usize },

    #[error("expression nested too deeply (max depth {max})")]
    TooDeep { max: usize },

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("not an array: {name} is {found}")]
    NotAnArray { name: String, found: &'static str },

    #[error("{0}")]
    Arity(String),

    #[error("unbalanced brackets")]
    Unbalanced,

    #[error("invalid expression: {0}")]
    InvalidExpression(String),
}

impl ExprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::TooLong { .. } | ExprError::Denied { .. } => ErrorKind::RejectedByGuard,
            ExprError::InvalidCharacter { .. } | ExprError::UnterminatedString { .. } => {
                ErrorKind::Lexical
            }
            ExprError::TooComplex { .. } | ExprError::TooDeep { .. } => ErrorKind::TooComplex,
            ExprError::UnknownVariable(_)
            | ExprError::UnknownFunction(_)
            | ExprError::NotAnArray { .. } => ErrorKind::UnknownIdentifier,
            ExprError::Arity(_) | ExprError::Unbalanced | ExprError::InvalidExpression(_) => {
                ErrorKind::Structural
            }
        }
    }
}
