//! Tokens produced by the tokenizer and consumed by the recognizer.
//!
//! Grounded in the source's `TokenType`/token pair: a closed set of lexical
//! categories plus an optional attached value, mirroring [`crate::symbol::Symbol`]'s
//! own terminal/value split.

use crate::symbol::TokenValue;
use std::fmt;

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Whitespace,
    Name,
    Integer,
    String,
    EndOfInput,
}

/// A single lexical token: a category plus, for everything but
/// `EndOfInput`, an attached value carrying its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(token_type: TokenType, value: Option<TokenValue>) -> Self {
        Self { token_type, value }
    }

    /// The token's raw text, if it carries one.
    pub fn lexeme(&self) -> Option<String> {
        self.value.as_ref().map(|v| v.to_string())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{:?}({})", self.token_type, value),
            None => write!(f, "{:?}", self.token_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexeme_reflects_attached_value() {
        let t = Token::new(TokenType::Integer, Some(TokenValue::Int(42)));
        assert_eq!(t.lexeme(), Some("42".to_string()));

        let eof = Token::new(TokenType::EndOfInput, None);
        assert_eq!(eof.lexeme(), None);
    }
}
