use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded, repeat};
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, one_of, take_till, take_while};

use crate::error::ScanError;
use crate::scanner::Scanned;
use crate::scanner::token::{Literal, Span, Token, TokenKind, keyword_kind};

type Input<'a> = LocatingSlice<&'a str>;

fn line_comment<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    ("//", take_till(0.., '\n')).void().parse_next(input)
}

/// String body up to the closing quote, and the closing quote if the input
/// has one.
fn string_literal<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, Option<char>)> {
    preceded('"', (take_till(0.., '"'), opt('"'))).parse_next(input)
}

/// A digit run followed by any number of `.digits` groups. A `.` without a
/// digit after it is left in the input.
fn number_literal<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (digit1, repeat::<_, _, (), _, _>(0.., ('.', digit1)))
        .take()
        .parse_next(input)
}

fn identifier<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// `!`, `=`, `<`, `>` with one character of lookahead for a trailing `=`.
fn comparison<'a>(input: &mut Input<'a>) -> ModalResult<TokenKind> {
    (one_of(['!', '=', '<', '>']), opt('='))
        .map(|(c, equal): (char, Option<char>)| match (c, equal.is_some()) {
            ('!', false) => TokenKind::Bang,
            ('!', true) => TokenKind::BangEqual,
            ('=', false) => TokenKind::Equal,
            ('=', true) => TokenKind::EqualEqual,
            ('<', false) => TokenKind::Less,
            ('<', true) => TokenKind::LessEqual,
            ('>', false) => TokenKind::Greater,
            ('>', true) => TokenKind::GreaterEqual,
            _ => unreachable!("one_of guarantees comparison char"),
        })
        .parse_next(input)
}

fn single_char_token<'a>(input: &mut Input<'a>) -> ModalResult<TokenKind> {
    let c = any
        .verify(|c: &char| "(){},.-+;/*".contains(*c))
        .parse_next(input)?;
    let kind = match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '-' => TokenKind::Minus,
        '+' => TokenKind::Plus,
        ';' => TokenKind::Semicolon,
        '/' => TokenKind::Slash,
        '*' => TokenKind::Star,
        _ => unreachable!("verify guarantees valid char"),
    };
    Ok(kind)
}

fn skip_char<'a>(input: &mut Input<'a>) -> ModalResult<char> {
    any.parse_next(input)
}

struct Lexer<'a> {
    source: &'a str,
    input: Input<'a>,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            input: LocatingSlice::new(source),
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> Scanned {
        while let Some(c) = self.input.chars().next() {
            let start = self.input.current_token_start();
            if self.scan_token(c, start).is_err() {
                self.unexpected(c, start);
            }
        }

        let eof_offset = self.source.len();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            self.line,
            Span::new(eof_offset, 0),
        ));

        tracing::debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            lines = self.line,
            "scan complete"
        );
        Scanned {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    /// Scan one token starting with `c`. Failing here means `c` starts no
    /// token at all.
    fn scan_token(&mut self, c: char, start: usize) -> ModalResult<()> {
        match c {
            ' ' | '\t' | '\r' => {
                skip_char(&mut self.input)?;
            }
            '\n' => {
                skip_char(&mut self.input)?;
                self.line += 1;
            }
            '/' if self.input.starts_with("//") => line_comment(&mut self.input)?,
            '"' => self.string(start)?,
            '0'..='9' => self.number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let text = identifier(&mut self.input)?;
                let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
                self.push(kind, start, None);
            }
            '!' | '=' | '<' | '>' => {
                let kind = comparison(&mut self.input)?;
                self.push(kind, start, None);
            }
            _ => {
                let kind = single_char_token(&mut self.input)?;
                self.push(kind, start, None);
            }
        }
        Ok(())
    }

    fn string(&mut self, start: usize) -> ModalResult<()> {
        let start_line = self.line;
        let (body, closing) = string_literal(&mut self.input)?;
        self.line += body.matches('\n').count();
        let end = self.input.current_token_start();

        if closing.is_none() {
            self.error(ScanError::unterminated_string(
                start_line,
                Span::new(start, end - start),
            ));
            return Ok(());
        }

        let token = Token::new(
            TokenKind::String,
            &self.source[start..end],
            start_line,
            Span::new(start, end - start),
        )
        .with_literal(Literal::Str(body.to_string()))
        .ending_on(self.line);
        self.tokens.push(token);
        Ok(())
    }

    fn number(&mut self, start: usize) -> ModalResult<()> {
        let lexeme = number_literal(&mut self.input)?;
        match lexeme.parse::<f64>() {
            Ok(value) if lexeme.matches('.').count() <= 1 => {
                self.push(TokenKind::Number, start, Some(Literal::Number(value)));
            }
            _ => self.error(ScanError::invalid_number(
                lexeme,
                self.line,
                Span::new(start, lexeme.len()),
            )),
        }
        Ok(())
    }

    fn unexpected(&mut self, c: char, start: usize) {
        // Step past the offending character so scanning resumes after it.
        let _ = skip_char(&mut self.input);
        self.error(ScanError::unexpected_character(
            c,
            self.line,
            Span::new(start, c.len_utf8()),
        ));
    }

    fn push(&mut self, kind: TokenKind, start: usize, literal: Option<Literal>) {
        let end = self.input.current_token_start();
        let mut token = Token::new(
            kind,
            &self.source[start..end],
            self.line,
            Span::new(start, end - start),
        );
        token.literal = literal;
        self.tokens.push(token);
    }

    fn error(&mut self, error: ScanError) {
        tracing::trace!(line = error.line(), %error, "scan error");
        self.errors.push(error);
    }
}

/// Scan all tokens from source. Lexical errors are collected alongside the
/// tokens; the token list always ends with a single `Eof`.
pub fn scan_all(source: &str) -> Scanned {
    Lexer::new(source).run()
}
