pub mod lexer;
pub mod token;

use crate::error::ScanError;
use token::Token;

/// Tokens and lexical errors from one scan, both in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl Scanned {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The tokens when the scan was clean, otherwise the errors.
    pub fn into_result(self) -> Result<Vec<Token>, Vec<ScanError>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

/// Scan source code into a list of tokens.
pub fn scan(source: &str) -> Scanned {
    lexer::scan_all(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use token::TokenKind;

    #[test]
    fn clean_scan_into_result_is_ok() {
        let tokens = scan("print 1;").into_result().expect("scan should succeed");
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn errors_keep_tokens_alongside() {
        let scanned = scan("1 @ 2");
        assert!(scanned.has_errors());
        let kinds: Vec<TokenKind> = scanned.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
        let errors = scanned.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn scans_on_separate_threads() {
        let handles: Vec<_> = ["var a = 1;", "\"x", "a >= b"]
            .into_iter()
            .map(|source| std::thread::spawn(move || scan(source)))
            .collect();
        let results: Vec<Scanned> = handles
            .into_iter()
            .map(|h| h.join().expect("scan thread panicked"))
            .collect();
        assert!(!results[0].has_errors());
        assert!(results[1].has_errors());
        assert_eq!(results[2].tokens.len(), 4);
    }
}
