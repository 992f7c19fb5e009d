use std::fmt::Write;
use std::path::Path;

use crate::error::ScanError;
use crate::scanner::token::Token;

/// One `<KIND> <lexeme> <literal>` line per token.
pub fn to_text(tokens: &[Token]) -> String {
    let mut buf = String::new();
    for token in tokens {
        let _ = writeln!(buf, "{token}");
    }
    buf
}

pub fn to_json(tokens: &[Token]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(tokens)?;
    json.push('\n');
    Ok(json)
}

/// Scan errors one per line, as plain messages or as annotated source
/// reports.
pub fn errors(errors: &[ScanError], path: &Path, source: &str, pretty: bool) -> String {
    let mut buf = String::new();
    for error in errors {
        if pretty {
            let report = error
                .clone()
                .with_source_code(path.display().to_string(), source);
            let _ = writeln!(buf, "{report:?}");
        } else {
            let _ = writeln!(buf, "{error}");
        }
    }
    buf
}
