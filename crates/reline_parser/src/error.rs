//! Parser errors.

use thiserror::Error;

/// Internal errors of the parser. User-facing problems are diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token stream carries lexer errors; it must not be parsed.
    #[error("cannot parse a token stream with {count} lexer error(s)")]
    LexerDiagnostics { count: usize },
}
