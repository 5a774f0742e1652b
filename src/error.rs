//! Error types for the predictive parser crate.
//!
//! Each failure class named by the error taxonomy gets its own `thiserror`
//! enum (`GrammarError`, `TokenizerError`, `ParseError`); [`Error`] aggregates
//! them for callers, such as the CLI, that need to handle more than one class
//! uniformly.

use thiserror::Error;

/// Errors raised while constructing or loading a [`crate::grammar::Grammar`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("nonterminal {0:?} is used in a production but has no rule")]
    MissingRule(String),

    #[error("start symbol {0:?} has no rule")]
    StartNotDeclared(String),

    #[error("invalid grammar text: {0}")]
    InvalidFormat(String),

    #[error("empty grammar input")]
    EmptyInput,

    #[error("not enough production lines: expected {expected}, got {actual}")]
    NotEnoughProductions { expected: usize, actual: usize },
}

/// Errors raised while tokenizing raw text into [`crate::token::Token`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("malformed lexeme {0:?}")]
    MalformedLexeme(String),
}

/// Errors raised while recognizing a token stream against a parsing table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no entry in M[{nonterminal}, {lookahead}]; stack was {stack:?}")]
    NoTableEntry { nonterminal: String, lookahead: String, stack: Vec<String> },

    #[error("expected terminal {expected:?}, found {found:?}; stack was {stack:?}")]
    TerminalMismatch { expected: String, found: String, stack: Vec<String> },

    #[error("truncated input: input exhausted with stack still {stack:?}")]
    TruncatedInput { stack: Vec<String> },

    #[error("trailing input: stack emptied with input remaining at {remaining:?}")]
    TrailingInput { remaining: String },
}

/// Top-level error aggregating every class this crate can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Type alias for `Result`s in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
