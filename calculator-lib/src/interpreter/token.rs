use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Value,
    Operation,
}

/// A discrete part of an expression: one whitespace-delimited word and what kind of word it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new_value(text: impl Into<String>) -> Token {
        Token {
            kind: TokenKind::Value,
            text: text.into(),
        }
    }

    pub fn new_operation(text: impl Into<String>) -> Token {
        Token {
            kind: TokenKind::Operation,
            text: text.into(),
        }
    }

    pub fn is_value(&self) -> bool {
        self.kind == TokenKind::Value
    }

    pub fn is_operation(&self) -> bool {
        self.kind == TokenKind::Operation
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
