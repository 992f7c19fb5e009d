use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

/// A lexical problem found while scanning. Never fatal to the scan.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ScanError {
    #[error("[line {line}] Error: Unexpected character: {character}")]
    #[diagnostic(code(lox::scan::unexpected_character))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        #[label("not valid here")]
        span: SourceSpan,
    },

    #[error("[line {line}] Error: Unterminated string.")]
    #[diagnostic(
        code(lox::scan::unterminated_string),
        help("add a closing '\"' before the end of the file")
    )]
    UnterminatedString {
        line: usize,
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("[line {line}] Error: Invalid number: {lexeme}")]
    #[diagnostic(
        code(lox::scan::invalid_number),
        help("a number may contain at most one decimal point")
    )]
    InvalidNumber {
        lexeme: String,
        line: usize,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ScanError {
    pub fn unexpected_character(character: char, line: usize, span: Span) -> Self {
        Self::UnexpectedCharacter {
            character,
            line,
            span: span.into(),
        }
    }

    pub fn unterminated_string(line: usize, span: Span) -> Self {
        Self::UnterminatedString {
            line,
            span: span.into(),
        }
    }

    pub fn invalid_number(lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self::InvalidNumber {
            lexeme: lexeme.into(),
            line,
            span: span.into(),
        }
    }

    /// Line the error is reported on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line, .. }
            | Self::InvalidNumber { line, .. } => *line,
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(
        self,
        name: impl AsRef<str>,
        source: impl Into<String>,
    ) -> miette::Report {
        miette::Report::new(self).with_source_code(miette::NamedSource::new(name, source.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_span(err: &ScanError) -> Option<SourceSpan> {
        err.labels()
            .and_then(|mut labels| labels.next())
            .map(|label| *label.inner())
    }

    #[test]
    fn scan_error_implements_diagnostic() {
        let err = ScanError::unexpected_character('@', 1, Span::new(0, 1));
        let diag: &dyn Diagnostic = &err;
        assert_eq!(
            diag.code().map(|c| c.to_string()),
            Some("lox::scan::unexpected_character".to_string())
        );
    }

    #[test]
    fn unexpected_character_message() {
        let err = ScanError::unexpected_character('$', 3, Span::new(10, 1));
        assert_eq!(err.to_string(), "[line 3] Error: Unexpected character: $");
    }

    #[test]
    fn unterminated_string_message() {
        let err = ScanError::unterminated_string(2, Span::new(4, 6));
        assert_eq!(err.to_string(), "[line 2] Error: Unterminated string.");
    }

    #[test]
    fn invalid_number_message() {
        let err = ScanError::invalid_number("1.2.3", 1, Span::new(0, 5));
        assert_eq!(err.to_string(), "[line 1] Error: Invalid number: 1.2.3");
    }

    #[test]
    fn label_uses_token_span() {
        let err = ScanError::invalid_number("123.456.789", 4, Span::new(7, 11));
        assert_eq!(label_span(&err), Some(SourceSpan::new(7.into(), 11)));
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn with_source_code_keeps_message() {
        let report = ScanError::unterminated_string(1, Span::new(0, 4))
            .with_source_code("test.lox", "\"foo");
        assert_eq!(report.to_string(), "[line 1] Error: Unterminated string.");
    }
}
