//! Tokenizer for rule expressions.

use crate::error::ExprError;
use std::fmt;

/// Operator and punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl Op {
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::And => "&&",
            Op::Or => "||",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::StrictEq => "===",
            Op::StrictNe => "!==",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Ge => ">=",
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Percent => "%",
            Op::Bang => "!",
            Op::LParen => "(",
            Op::RParen => ")",
            Op::LBracket => "[",
            Op::RBracket => "]",
            Op::Comma => ",",
        }
    }

    fn single(c: char) -> Option<Op> {
        Some(match c {
            '+' => Op::Plus,
            '-' => Op::Minus,
            '*' => Op::Star,
            '/' => Op::Slash,
            '%' => Op::Percent,
            '<' => Op::Lt,
            '>' => Op::Gt,
            '(' => Op::LParen,
            ')' => Op::RParen,
            '[' => Op::LBracket,
            ']' => Op::RBracket,
            ',' => Op::Comma,
            '!' => Op::Bang,
            _ => return None,
        })
    }
}

// Longest first so `===` wins over `==`.
const MULTI_CHAR_OPS: &[(&str, Op)] = &[
    ("===", Op::StrictEq),
    ("!==", Op::StrictNe),
    ("&&", Op::And),
    ("||", Op::Or),
    ("==", Op::Eq),
    ("!=", Op::Ne),
    ("<=", Op::Le),
    (">=", Op::Ge),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A run of digits and dots; not necessarily a well-formed number.
    Number(String),
    Ident(String),
    /// String literal contents with quotes stripped and escapes resolved.
    Str(String),
    Op(Op),
}

impl Token {
    pub fn op(&self) -> Option<Op> {
        match self {
            Token::Op(op) => Some(*op),
            _ => None,
        }
    }

    pub fn is_op(&self, op: Op) -> bool {
        self.op() == Some(op)
    }

    /// True for tokens that can end an operand, i.e. after which `-` is binary.
    pub fn ends_operand(&self) -> bool {
        match self {
            Token::Number(_) | Token::Ident(_) | Token::Str(_) => true,
            Token::Op(op) => matches!(op, Op::RParen | Op::RBracket),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(s) | Token::Ident(s) => f.write_str(s),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Op(op) => f.write_str(op.symbol()),
        }
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    buf: String,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            buf: String::new(),
        }
    }

    /// Emits the pending word. A word made only of digits and dots is a
    /// number; anything else is an identifier, dots and leading digits included.
    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buf);
        if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            self.tokens.push(Token::Number(text));
        } else {
            self.tokens.push(Token::Ident(text));
        }
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut i = self.pos;
        for c in pattern.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn run(mut self) -> Result<Vec<Token>, ExprError> {
        'scan: while let Some(&c) = self.chars.get(self.pos) {
            if c.is_whitespace() {
                self.flush();
                self.pos += 1;
                continue;
            }

            for &(text, op) in MULTI_CHAR_OPS {
                if self.starts_with(text) {
                    self.flush();
                    self.tokens.push(Token::Op(op));
                    self.pos += text.len();
                    continue 'scan;
                }
            }

            if let Some(op) = Op::single(c) {
                self.flush();
                self.tokens.push(Token::Op(op));
                self.pos += 1;
                continue;
            }

            if c == '\'' || c == '"' {
                self.flush();
                self.string(c)?;
                continue;
            }

            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.buf.push(c);
                self.pos += 1;
                continue;
            }

            return Err(ExprError::InvalidCharacter {
                ch: c,
                position: self.pos,
            });
        }
        self.flush();
        Ok(self.tokens)
    }

    fn string(&mut self, quote: char) -> Result<(), ExprError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        while let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == quote {
                self.tokens.push(Token::Str(text));
                return Ok(());
            }
            if c == '\\' {
                match self.chars.get(self.pos) {
                    Some(&escaped) => {
                        text.push(escaped);
                        self.pos += 1;
                    }
                    None => break,
                }
            } else {
                text.push(c);
            }
        }
        Err(ExprError::UnterminatedString { position: start })
    }
}

/// Splits `expression` into tokens.
///
/// Positions reported in errors are character offsets.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ExprError> {
    Lexer::new(expression).run()
}

/// Checks that `()` and `[]` pair up and nest properly.
pub fn check_balanced(tokens: &[Token]) -> Result<(), ExprError> {
    let mut stack = Vec::new();
    for token in tokens {
        match token.op() {
            Some(Op::LParen) => stack.push(Op::RParen),
            Some(Op::LBracket) => stack.push(Op::RBracket),
            Some(close @ (Op::RParen | Op::RBracket)) => {
                if stack.pop() != Some(close) {
                    return Err(ExprError::Unbalanced);
                }
            }
            _ => {}
        }
    }
    if stack.is_empty() {
        Ok(())
    } else {
        Err(ExprError::Unbalanced)
    }
}
