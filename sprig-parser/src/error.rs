//! Syntax errors raised by the lexer and the parser.
//!
//! Every error is fatal: the first one aborts tokenizing or parsing and carries the byte
//! offset at which it happened.

use crate::lexer::Token;
use thiserror::Error;

/// No token pattern matches the input at `offset`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error: unexpected character {found:?} at position {offset}")]
pub struct LexError {
    pub offset: usize,
    pub found: char,
}

impl LexError {
    pub(crate) fn at(source: &str, offset: usize) -> Self {
        Self {
            offset,
            found: source[offset..].chars().next().unwrap_or_default(),
        }
    }
}

/// An error raised while parsing a token sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A required token is missing, e.g. an unmatched `(`.
    #[error("expected {expected} but found {} at position {}", .found.kind, .found.offset())]
    Expected { expected: &'static str, found: Token },
    /// The token matches none of the alternatives of the current grammar rule.
    #[error("unexpected {} at position {}", .found.kind, .found.offset())]
    UnexpectedToken { found: Token },
    /// Expressions or blocks are nested deeper than [`crate::parser::MAX_NESTING`].
    #[error("nesting too deep at position {}", .found.offset())]
    TooDeep { found: Token },
}

impl ParseError {
    /// The token at which parsing stopped.
    pub fn found(&self) -> &Token {
        match self {
            ParseError::Expected { found, .. }
            | ParseError::UnexpectedToken { found }
            | ParseError::TooDeep { found } => found,
        }
    }

    pub fn offset(&self) -> usize {
        self.found().offset()
    }
}

/// Either stage failing while going from source text to a syntax tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::Lex(err) => err.offset,
            SyntaxError::Parse(err) => err.offset(),
        }
    }
}
