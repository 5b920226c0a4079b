//! Tokens produced by the lexer and carried by syntax nodes.

use crate::syntax_kind::SyntaxKind;
use reline_core::text::TextSpan;
use reline_diagnostics::Diagnostic;
use std::fmt;

/// The literal payload of a token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Integer(i32),
    String(String),
}

/// A scanned token with its trivia and any diagnostics reported on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Span of the token itself, excluding trivia.
    pub span: TextSpan,
    /// The exact source text of the token.
    pub text: String,
    pub value: TokenValue,
    pub leading_trivia: Vec<Token>,
    pub trailing_trivia: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
            value: TokenValue::None,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// A zero-width token synthesized by the parser where one was expected.
    pub fn missing(kind: SyntaxKind, pos: u32) -> Self {
        Self::new(kind, TextSpan::empty(pos), String::new())
    }

    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Whether the parser synthesized this token.
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EndOfFile
    }

    /// Span including leading and trailing trivia.
    pub fn full_span(&self) -> TextSpan {
        let start = self.leading_trivia.first().map_or(self.span.start, |t| t.span.start);
        let end = self.trailing_trivia.last().map_or(self.span.end(), |t| t.span.end());
        TextSpan::from_bounds(start, end)
    }

    /// The token's text, or a description of its kind when it has none.
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            self.kind.description()
        } else {
            &self.text
        }
    }

    pub fn integer_value(&self) -> Option<i32> {
        match self.value {
            TokenValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this token, or any of its trivia, carries an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
            || self.leading_trivia.iter().any(Token::has_errors)
            || self.trailing_trivia.iter().any(Token::has_errors)
    }

    /// Write the token's full text, trivia included.
    pub fn write_full_text(&self, out: &mut String) {
        for trivia in &self.leading_trivia {
            trivia.write_full_text(out);
        }
        out.push_str(&self.text);
        for trivia in &self.trailing_trivia {
            trivia.write_full_text(out);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' {}", self.kind, self.text, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_span_covers_trivia() {
        let mut token = Token::new(SyntaxKind::Identifier, TextSpan::new(2, 3), "foo");
        token.leading_trivia.push(Token::new(SyntaxKind::Whitespace, TextSpan::new(0, 2), "  "));
        token.trailing_trivia.push(Token::new(SyntaxKind::Comment, TextSpan::new(5, 4), "// x"));
        assert_eq!(token.full_span(), TextSpan::from_bounds(0, 9));

        let mut text = String::new();
        token.write_full_text(&mut text);
        assert_eq!(text, "  foo// x");
    }

    #[test]
    fn test_missing_token() {
        let token = Token::missing(SyntaxKind::Unknown, 4);
        assert!(token.is_missing());
        assert_eq!(token.display_text(), "unknown");
        assert!(!Token::missing(SyntaxKind::EndOfFile, 4).is_missing());
    }
}
