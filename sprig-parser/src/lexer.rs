use crate::error::LexError;
use logos::{Lexer, Logos};
use std::fmt;
use std::ops::Range;

/// Byte range of a token in the source text.
pub type Span = Range<usize>;

/// A decoded numeric literal. The integer/float distinction is decided by the
/// presence of a decimal point and must survive into evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            // `{:?}` keeps the trailing `.0` on integral floats.
            Number::Float(val) => write!(f, "{:?}", val),
        }
    }
}

fn number(lex: &mut Lexer<TokenKind>) -> Option<Number> {
    let slice = lex.slice();
    // overflowing literals become lexer errors
    if slice.contains('.') {
        slice
            .parse::<f64>()
            .ok()
            .filter(|val| val.is_finite())
            .map(Number::Float)
    } else {
        slice.parse().ok().map(Number::Int)
    }
}

/// Strips the quotes and decodes escapes. Each escape is decoded as a unit so
/// that `\\n` is a backslash followed by `n`.
fn string(lex: &mut Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let mut decoded = String::with_capacity(slice.len());
    let mut chars = slice[1..slice.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        // the token regex only admits these four escapes
        match chars.next() {
            Some('t') => decoded.push('\t'),
            Some('n') => decoded.push('\n'),
            Some(other) => decoded.push(other),
            None => {}
        }
    }
    decoded
}

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]*\.[0-9]+|[0-9]+\.[0-9]*|[0-9]+", number)]
    NumberLit(Number),
    #[regex(r#""([^"\\]|\\[tn"\\])*""#, string)]
    StringLit(String),

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // keywords
    #[token("print")]
    Print,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("continue")]
    Continue,
    #[token("break")]
    Break,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("assert")]
    Assert,

    // logical operators, symbolic and keyword spellings
    #[token("and")]
    #[token("&&")]
    And,
    #[token("or")]
    #[token("||")]
    Or,
    #[token("not")]
    #[token("!")]
    Not,

    // arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // relational
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token("=")]
    Assign,

    // punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[error]
    Error,

    /// Sentinel appended by [`tokenize`]. Never produced by the derived lexer.
    EndOfInput,
}

impl TokenKind {
    /// Short human readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::NumberLit(_) => "number",
            TokenKind::StringLit(_) => "string",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Print => "`print`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Continue => "`continue`",
            TokenKind::Break => "`break`",
            TokenKind::Function => "`function`",
            TokenKind::Return => "`return`",
            TokenKind::Assert => "`assert`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Eq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Le => "`<=`",
            TokenKind::Ge => "`>=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Assign => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Error => "invalid token",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(val) => write!(f, "number {}", val),
            TokenKind::StringLit(val) => write!(f, "string {:?}", val),
            TokenKind::Identifier(ident) => write!(f, "identifier `{}`", ident),
            _ => f.write_str(self.name()),
        }
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The end-of-input sentinel for a source of `len` bytes.
    pub fn end_of_input(len: usize) -> Self {
        Self::new(TokenKind::EndOfInput, len..len)
    }

    /// Byte offset of the first character of this token.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Converts `source` into tokens. The returned sequence always ends with exactly one
/// [`TokenKind::EndOfInput`] sentinel positioned at `source.len()`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        if kind == TokenKind::Error {
            return Err(LexError::at(source, span.start));
        }
        tokens.push(Token::new(kind, span));
    }
    tokens.push(Token::end_of_input(source.len()));

    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn single(source: &str) -> TokenKind {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 2, "expected a single token in {:?}", source);
        assert_eq!(tokens[0].offset(), 0);
        tokens[0].kind.clone()
    }

    #[test]
    fn test_punctuation() {
        let expected = [
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Star),
            ("/", TokenKind::Slash),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("=", TokenKind::Assign),
            (";", TokenKind::Semicolon),
            ("<", TokenKind::Lt),
            (">", TokenKind::Gt),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            ("[", TokenKind::LBracket),
            ("]", TokenKind::RBracket),
            (".", TokenKind::Dot),
            (",", TokenKind::Comma),
            (":", TokenKind::Colon),
            ("==", TokenKind::Eq),
            ("!=", TokenKind::NotEq),
            ("<=", TokenKind::Le),
            (">=", TokenKind::Ge),
        ];
        for (source, kind) in expected.iter() {
            assert_eq!(&single(source), kind, "lexing {:?}", source);
        }
    }

    #[test]
    fn test_symbolic_logical_operators() {
        assert_eq!(single("!"), TokenKind::Not);
        assert_eq!(single("&&"), TokenKind::And);
        assert_eq!(single("||"), TokenKind::Or);
        assert_eq!(single("not"), TokenKind::Not);
        assert_eq!(single("and"), TokenKind::And);
        assert_eq!(single("or"), TokenKind::Or);
    }

    #[test]
    fn test_keywords() {
        let expected = [
            ("print", TokenKind::Print),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("while", TokenKind::While),
            ("continue", TokenKind::Continue),
            ("break", TokenKind::Break),
            ("function", TokenKind::Function),
            ("return", TokenKind::Return),
            ("assert", TokenKind::Assert),
        ];
        for (source, kind) in expected.iter() {
            assert_eq!(&single(source), kind, "lexing {:?}", source);
        }
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(single("iffy"), TokenKind::Identifier("iffy".to_string()));
        assert_eq!(single("printer"), TokenKind::Identifier("printer".to_string()));
        assert_eq!(single("or_else"), TokenKind::Identifier("or_else".to_string()));
        assert_eq!(single("_not1"), TokenKind::Identifier("_not1".to_string()));
    }

    #[test]
    fn test_identifiers() {
        for source in ["x", "y", "alpha", "beta_2", "_"].iter() {
            assert_eq!(single(source), TokenKind::Identifier(source.to_string()));
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(single("1"), TokenKind::NumberLit(Number::Int(1)));
        assert_eq!(single("11"), TokenKind::NumberLit(Number::Int(11)));
        assert_eq!(single("5.0"), TokenKind::NumberLit(Number::Float(5.0)));
        assert_eq!(single("11.11"), TokenKind::NumberLit(Number::Float(11.11)));
        assert_eq!(single(".5"), TokenKind::NumberLit(Number::Float(0.5)));
        assert_eq!(single("5."), TokenKind::NumberLit(Number::Float(5.0)));
    }

    #[test]
    fn test_double_dot_splits_numbers() {
        assert_eq!(
            kinds("5..2"),
            vec![
                TokenKind::NumberLit(Number::Float(5.0)),
                TokenKind::NumberLit(Number::Float(0.2)),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_integer_overflow_is_error() {
        let err = tokenize("x = 99999999999999999999").unwrap_err();
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_float_overflow_is_error() {
        let huge = format!("x = {}.5", "9".repeat(400));
        let err = tokenize(&huge).unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.found, '9');
    }

    #[test]
    fn test_strings() {
        assert_eq!(single(r#""abc""#), TokenKind::StringLit("abc".to_string()));
        assert_eq!(single(r#""""#), TokenKind::StringLit(String::new()));
        assert_eq!(single(r#""ab\"c""#), TokenKind::StringLit("ab\"c".to_string()));
        assert_eq!(single(r#""ab\nc""#), TokenKind::StringLit("ab\nc".to_string()));
        assert_eq!(single(r#""ab\tc""#), TokenKind::StringLit("ab\tc".to_string()));
        assert_eq!(single(r#""ab\\c""#), TokenKind::StringLit("ab\\c".to_string()));
        // escaped backslash followed by a plain `n`
        assert_eq!(single(r#""a\\nb""#), TokenKind::StringLit("a\\nb".to_string()));
    }

    #[test]
    fn test_whitespace() {
        assert_debug_snapshot!(tokenize("1 + 2").unwrap(), @r###"
        [
            Token {
                kind: NumberLit(
                    Int(
                        1,
                    ),
                ),
                span: 0..1,
            },
            Token {
                kind: Plus,
                span: 2..3,
            },
            Token {
                kind: NumberLit(
                    Int(
                        2,
                    ),
                ),
                span: 4..5,
            },
            Token {
                kind: EndOfInput,
                span: 5..5,
            },
        ]
        "###);
    }

    #[test]
    fn test_spans_cover_input() {
        let source = "x = [1, 2.5]; print(x[0] && !y, \"s\\\"t\")\n\tf.g(\"\")";
        let tokens = tokenize(source).unwrap();

        let mut covered = String::new();
        let mut last = 0;
        for token in &tokens {
            assert!(token.span.start >= last, "offsets must not decrease");
            last = token.span.end;
            covered.push_str(&source[token.span.clone()]);
        }
        let expected: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(covered, expected);

        let sentinels = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::EndOfInput)
            .count();
        assert_eq!(sentinels, 1);
        assert_eq!(tokens.last().unwrap().offset(), source.len());
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(tokenize("").unwrap(), vec![Token::end_of_input(0)]);
        assert_eq!(tokenize(" \n\t ").unwrap(), vec![Token::end_of_input(4)]);
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("$1+2").unwrap_err();
        assert_eq!(err.offset, 0);
        assert_eq!(err.found, '$');

        let err = tokenize("1 + @").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.to_string(), "syntax error: unexpected character '@' at position 4");
    }

    #[test]
    fn test_lone_ampersand_is_error() {
        assert_eq!(tokenize("a & b").unwrap_err().offset, 2);
    }
}
