use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

/// Decoded value of a `STRING` or `NUMBER` token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Integral values keep one fractional digit (`42` prints as `42.0`).
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        format!("{n}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// Line the token starts on.
    pub line: usize,
    /// Line the token ends on; differs from `line` only for multi-line strings.
    pub end_line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            end_line: line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn ending_on(mut self, end_line: usize) -> Self {
        self.end_line = end_line;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "and" => Some(TokenKind::And),
        "class" => Some(TokenKind::Class),
        "else" => Some(TokenKind::Else),
        "false" => Some(TokenKind::False),
        "fun" => Some(TokenKind::Fun),
        "for" => Some(TokenKind::For),
        "if" => Some(TokenKind::If),
        "nil" => Some(TokenKind::Nil),
        "or" => Some(TokenKind::Or),
        "print" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "this" => Some(TokenKind::This),
        "true" => Some(TokenKind::True),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenKind::LeftParen, "LEFT_PAREN")]
    #[case(TokenKind::BangEqual, "BANG_EQUAL")]
    #[case(TokenKind::GreaterEqual, "GREATER_EQUAL")]
    #[case(TokenKind::Identifier, "IDENTIFIER")]
    #[case(TokenKind::While, "WHILE")]
    #[case(TokenKind::Eof, "EOF")]
    fn kind_display(#[case] kind: TokenKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    #[case(42.0, "42.0")]
    #[case(2.25, "2.25")]
    #[case(1.5, "1.5")]
    #[case(0.0, "0.0")]
    #[case(1234.5678, "1234.5678")]
    #[case(1e16, "10000000000000000.0")]
    fn number_literal_display(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(Literal::Number(value).to_string(), expected);
    }

    #[test]
    fn token_without_literal_prints_null() {
        let token = Token::new(TokenKind::LeftParen, "(", 1, Span::new(0, 1));
        assert_eq!(token.to_string(), "LEFT_PAREN ( null");
    }

    #[test]
    fn eof_token_display() {
        let token = Token::new(TokenKind::Eof, "", 1, Span::new(0, 0));
        assert_eq!(token.to_string(), "EOF  null");
    }

    #[test]
    fn string_token_prints_unquoted_literal() {
        let token = Token::new(TokenKind::String, "\"hi\"", 1, Span::new(0, 4))
            .with_literal(Literal::Str("hi".to_string()));
        assert_eq!(token.to_string(), "STRING \"hi\" hi");
    }

    #[test]
    fn number_token_display() {
        let token =
            Token::new(TokenKind::Number, "10", 1, Span::new(0, 2)).with_literal(Literal::Number(10.0));
        assert_eq!(token.to_string(), "NUMBER 10 10.0");
    }

    #[test]
    fn end_line_defaults_to_start_line() {
        let token = Token::new(TokenKind::Identifier, "x", 3, Span::new(0, 1));
        assert_eq!(token.end_line, 3);
        assert_eq!(token.ending_on(5).end_line, 5);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(keyword_kind("class"), Some(TokenKind::Class));
        assert_eq!(keyword_kind("Class"), None);
        assert_eq!(keyword_kind("classy"), None);
    }
}
