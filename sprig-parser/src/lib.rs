//! Tokenizer and recursive descent parser for the sprig language.
//!
//! Source text flows one way: [`tokenize`] turns it into [`Token`]s, [`parse`] turns those into a
//! [`Program`]. Both stop at the first error.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod visitor;

pub use ast::Program;
pub use error::{LexError, ParseError, SyntaxError};
pub use lexer::{tokenize, Token, TokenKind};

use parser::Parser;

/// Parses a token sequence produced by [`tokenize`].
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Tokenizes and parses `source` in one go.
pub fn parse_str(source: &str) -> Result<Program, SyntaxError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}
