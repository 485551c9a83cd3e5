use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use std::mem;

mod expr;
mod stmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// How many expressions and blocks may enclose each other before parsing fails.
pub const MAX_NESTING: usize = 128;

/// Recursive descent parser over a token sequence produced by [`crate::lexer::tokenize`].
///
/// Each grammar rule is one `parse_*` method. Parsing stops at the first error.
pub struct Parser<'a> {
    tokens: &'a [Token],
    /// Index of the current token in `tokens`.
    position: usize,
    /// Tokens pushed back in front of the cursor by a rewrite. The last one is current.
    injected: Vec<Token>,
    /// Stands in for the sentinel if `tokens` does not end with one.
    eof: Token,
    /// Number of expressions and blocks currently being parsed.
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |token| token.span.end);
        Self {
            tokens,
            position: 0,
            injected: Vec::new(),
            eof: Token::end_of_input(end),
            depth: 0,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses a whole program. Fails unless every token up to the end of input is consumed.
    ///
    /// `program = [ statement { ";" statement } ]`
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        if !self.check(&TokenKind::EndOfInput) {
            statements.push(self.parse_stmt()?);
            while self.eat(TokenKind::Semicolon) {
                statements.push(self.parse_stmt()?);
            }
        }
        self.expect(TokenKind::EndOfInput)?;

        log::debug!("parsed program with {} statements", statements.len());
        Ok(Program { statements })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// The current token.
    fn peek(&self) -> &Token {
        match self.injected.last() {
            Some(token) => token,
            None => self.tokens.get(self.position).unwrap_or(&self.eof),
        }
    }

    /// The token after the current one.
    fn peek_second(&self) -> &Token {
        match self.injected.len() {
            0 => self.tokens.get(self.position + 1).unwrap_or(&self.eof),
            1 => self.tokens.get(self.position).unwrap_or(&self.eof),
            n => &self.injected[n - 2],
        }
    }

    /// Consumes and returns the current token. The cursor never moves past the end of input.
    fn next(&mut self) -> Token {
        if let Some(token) = self.injected.pop() {
            return token;
        }
        let token = self.peek().clone();
        if token.kind != TokenKind::EndOfInput {
            self.position += 1;
        }
        token
    }

    /// Makes `token` the current token. Pushed tokens are consumed in reverse order of pushing.
    fn push_back(&mut self, token: Token) {
        self.injected.push(token);
    }

    /// Predicate that tests whether the current token has the same discriminant as `kind`.
    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.peek().kind) == mem::discriminant(kind)
    }

    /// Like [`Self::check`] but eats the current token if it matches as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(&kind) {
            Ok(self.next())
        } else {
            Err(self.expected(kind.name()))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Identifier(ident) => {
                let ident = ident.clone();
                self.next();
                Ok(ident)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// Creates a missing token error at the current token.
    fn expected(&self, expected: &'static str) -> ParseError {
        ParseError::Expected {
            expected,
            found: self.peek().clone(),
        }
    }

    /// Runs `rule` one nesting level deeper, failing once [`MAX_NESTING`] is reached.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                found: self.peek().clone(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Raises an unexpected token error at the current token.
    fn unexpected<T>(&self) -> ParseResult<T> {
        Err(ParseError::UnexpectedToken {
            found: self.peek().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use insta::assert_snapshot;

    fn program(source: &str) -> Program {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_program().unwrap()
    }

    fn program_err(source: &str) -> ParseError {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_program().unwrap_err()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(program(""), Program::default());
        assert_eq!(program("  \n "), Program::default());
    }

    #[test]
    fn test_program() {
        assert_snapshot!(program("print(1); print(2)").to_string(), @r###"
        (print 1)
        (print 2)
        "###);
        assert_snapshot!(program("x = 1; y = x * 2; print(x, y)").to_string(), @r###"
        (= x 1)
        (= y (* x 2))
        (print x y)
        "###);
    }

    #[test]
    fn test_trailing_tokens() {
        let err = program_err("1 2");
        assert_eq!(err.to_string(), "expected end of input but found number 2 at position 2");
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("x = {}1{}", "(".repeat(100), ")".repeat(100));
        assert_snapshot!(program(&source).to_string(), @"(= x 1)");

        let err = program_err(&format!("{}1{}", "(".repeat(1000), ")".repeat(1000)));
        assert!(matches!(err, ParseError::TooDeep { .. }));
        assert_eq!(err.to_string(), "nesting too deep at position 128");

        let err = program_err(&format!("{}1", "-".repeat(100_000)));
        assert!(matches!(err, ParseError::TooDeep { .. }));

        let err = program_err(&format!("{}{}", "{".repeat(200), "}".repeat(200)));
        assert!(matches!(err, ParseError::TooDeep { .. }));
    }

    #[test]
    fn test_trailing_semicolon() {
        let err = program_err("x = 1;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::EndOfInput,
                    ..
                }
            }
        ));
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn test_double_dot_number() {
        let err = program_err("5..2");
        assert_eq!(err.offset(), 2);
        assert!(matches!(err, ParseError::Expected { expected: "end of input", .. }));
    }

    #[test]
    fn test_missing_paren() {
        let err = program_err("(1+2");
        assert_eq!(
            err,
            ParseError::Expected {
                expected: "`)`",
                found: Token::end_of_input(4),
            }
        );
        assert_eq!(err.to_string(), "expected `)` but found end of input at position 4");
    }

    #[test]
    fn test_missing_brackets() {
        assert!(matches!(program_err("x = [1, 2"), ParseError::Expected { expected: "`]`", .. }));
        assert!(matches!(program_err("x = a[1"), ParseError::Expected { expected: "`]`", .. }));
        assert!(matches!(program_err("if (x) { y"), ParseError::Expected { expected: "`}`", .. }));
        assert!(matches!(program_err("x = {a: 1"), ParseError::Expected { expected: "`}`", .. }));
    }

    #[test]
    fn test_unexpected_token() {
        let err = program_err("x = ;");
        assert_eq!(err.to_string(), "unexpected `;` at position 4");
        let err = program_err("x = *2");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_parser_without_sentinel() {
        let tokens = tokenize("x = 1").unwrap();
        let without_sentinel = &tokens[..tokens.len() - 1];
        assert_eq!(
            Parser::new(without_sentinel).parse_program().unwrap(),
            program("x = 1")
        );
        assert_eq!(Parser::new(&[]).parse_program().unwrap(), Program::default());
    }
}
