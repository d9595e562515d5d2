//! Pattern guard: cheap textual rejection before any tokenizing.
//!
//! The grammar itself has no production for assignment, loops, or ambient
//! object access; the denylist below is a second line that rejects obviously
//! hostile input early and keeps rejecting it if the grammar ever grows.

use crate::error::ExprError;
use crate::options::EvaluatorOptions;
use regex::Regex;
use std::sync::OnceLock;

struct DenyRule {
    name: &'static str,
    pattern: Regex,
}

const DENY_PATTERNS: &[(&str, &str)] = &[
    ("dynamic code execution", r"\beval\s*\("),
    ("dynamic code execution", r"\bFunction\s*\("),
    ("object construction", r"\bnew\s+[A-Za-z_$]"),
    ("module import", r"\bimport\b"),
    ("module import", r"\brequire\s*\("),
    ("ambient object access", r"\bprocess\b"),
    ("ambient object access", r"\bglobal(?:This)?\b"),
    ("ambient object access", r"\bwindow\b"),
    ("ambient object access", r"\bdocument\b"),
    ("network access", r"\bfetch\s*\("),
    ("network access", r"(?i)\bXMLHttpRequest\b"),
    ("network access", r"(?i)\bWebSocket\b"),
    ("network access", r"(?i)\bsocket\b"),
    ("timer", r"\bset(?:Timeout|Interval|Immediate)\b"),
    ("loop", r"\bfor\s*\("),
    ("loop", r"\bwhile\s*\("),
    ("loop", r"\bdo\s*\{"),
    ("function declaration", r"\bfunction\b"),
    ("class declaration", r"\bclass\b"),
    ("arrow function", r"=>"),
    ("prototype access", r"\bconstructor\b"),
    ("prototype access", r"__proto__"),
    ("prototype access", r"\bprototype\b"),
];

fn deny_rules() -> &'static [DenyRule] {
    static RULES: OnceLock<Vec<DenyRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        DENY_PATTERNS
            .iter()
            .map(|&(name, pattern)| DenyRule {
                name,
                pattern: Regex::new(pattern).expect("deny pattern must compile"),
            })
            .collect()
    })
}

/// Accepts or rejects `expression` before it is tokenized.
///
/// The length check runs first so oversized input never reaches the regexes.
pub fn guard(expression: &str, options: &EvaluatorOptions) -> Result<(), ExprError> {
    let len = expression.chars().count();
    if len > options.max_length {
        return Err(ExprError::TooLong {
            len,
            max: options.max_length,
        });
    }
    match deny_rules().iter().find(|rule| rule.pattern.is_match(expression)) {
        Some(rule) => Err(ExprError::Denied { rule: rule.name }),
        None => Ok(()),
    }
}
