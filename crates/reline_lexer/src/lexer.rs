//! The Reline lexer.
//!
//! Scans left to right over the source with a byte cursor. Each call to
//! [`Lexer::next_token`] classifies the character at the cursor and returns
//! exactly one token; nothing is skipped.

use crate::char_codes::*;
use reline_core::text::TextSpan;
use reline_diagnostics::{messages, Diagnostic, DiagnosticBag};
use reline_syntax::{SyntaxKind, Token, TokenValue};

/// The output of lexing: every token, trivia included, plus the
/// diagnostics reported on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub diagnostics: DiagnosticBag,
}

impl LexResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Tokens that are neither trivia nor line terminators.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| !t.kind.is_trivia() && !t.kind.is_line_terminator())
    }

    /// Concatenated text of every token.
    pub fn full_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Lex a whole source text.
pub fn lex(source: &str) -> LexResult {
    Lexer::new(source).tokenize()
}

/// Converts Reline source text into tokens.
pub struct Lexer<'s> {
    text: &'s str,
    pos: usize,
    token_start: usize,
    finished: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            finished: false,
        }
    }

    /// Scan every token, ending with `EndOfFile`.
    pub fn tokenize(mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut diagnostics = DiagnosticBag::new();
        loop {
            let token = self.next_token();
            diagnostics.extend(token.diagnostics.iter().cloned());
            let done = token.kind == SyntaxKind::EndOfFile;
            tokens.push(token);
            if done {
                break;
            }
        }
        LexResult { tokens, diagnostics }
    }

    /// Whether the `EndOfFile` token has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// The character at the cursor.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// The character after the one at the cursor.
    #[inline]
    fn next_char(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    #[inline]
    fn advance(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.token_start as u32, self.pos as u32)
    }

    fn make_token(&self, kind: SyntaxKind) -> Token {
        Token::new(kind, self.span(), &self.text[self.token_start..self.pos])
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token. After `EndOfFile` has been returned, every
    /// further call returns another zero-width `EndOfFile`.
    pub fn next_token(&mut self) -> Token {
        self.token_start = self.pos;
        let Some(ch) = self.current_char() else {
            self.finished = true;
            return Token::missing(SyntaxKind::EndOfFile, self.text.len() as u32);
        };

        let fixed = match ch {
            '+' => Some(SyntaxKind::Plus),
            '-' => Some(SyntaxKind::Minus),
            '*' => Some(SyntaxKind::Asterisk),
            '%' => Some(SyntaxKind::Percent),
            '<' => Some(SyntaxKind::LessThan),
            '=' => Some(SyntaxKind::Equals),
            ':' => Some(SyntaxKind::Colon),
            '(' => Some(SyntaxKind::OpenParen),
            ')' => Some(SyntaxKind::CloseParen),
            '[' => Some(SyntaxKind::OpenBracket),
            ']' => Some(SyntaxKind::CloseBracket),
            '.' if self.next_char() == Some('.') => {
                self.pos += 1;
                Some(SyntaxKind::DotDot)
            }
            '/' if self.next_char() != Some('/') => Some(SyntaxKind::Slash),
            _ => None,
        };
        if let Some(kind) = fixed {
            self.advance(ch);
            return self.make_token(kind);
        }

        match ch {
            DOUBLE_QUOTE => self.scan_string_literal(),
            '0'..='9' => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            '/' => self.scan_comment(),
            LINE_FEED => {
                self.advance(ch);
                self.make_token(SyntaxKind::NewLine)
            }
            CARRIAGE_RETURN if self.next_char() == Some(LINE_FEED) => {
                self.pos += 2;
                self.make_token(SyntaxKind::NewLine)
            }
            _ if is_inline_whitespace(ch) => self.scan_whitespace(),
            _ => {
                self.advance(ch);
                let token = self.make_token(SyntaxKind::Unknown);
                let diagnostic = Diagnostic::at(
                    token.span,
                    &messages::UNEXPECTED_CHARACTER_0,
                    &[token.text.as_str()],
                );
                token.with_diagnostic(diagnostic)
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// No escape sequences. An unterminated string runs to end of input.
    fn scan_string_literal(&mut self) -> Token {
        let content_start = self.pos + 1;
        match memchr::memchr(b'"', &self.text.as_bytes()[content_start..]) {
            Some(offset) => {
                let content_end = content_start + offset;
                self.pos = content_end + 1;
                let content = self.text[content_start..content_end].to_string();
                self.make_token(SyntaxKind::StringLiteral)
                    .with_value(TokenValue::String(content))
            }
            None => {
                self.pos = self.text.len();
                let content = self.text[content_start..].to_string();
                let token = self
                    .make_token(SyntaxKind::StringLiteral)
                    .with_value(TokenValue::String(content));
                let diagnostic =
                    Diagnostic::at(token.span, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                token.with_diagnostic(diagnostic)
            }
        }
    }

    /// Decimal digits accumulated with wrapping 32-bit arithmetic.
    fn scan_number(&mut self) -> Token {
        let mut value: i32 = 0;
        while let Some(digit) = self.current_char().and_then(ascii_digit_value) {
            value = value.wrapping_mul(10).wrapping_add(digit);
            self.pos += 1;
        }
        self.make_token(SyntaxKind::NumberLiteral)
            .with_value(TokenValue::Integer(value))
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.advance(ch);
        }
        let text = &self.text[self.token_start..self.pos];
        let kind = SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier);
        self.make_token(kind)
    }

    /// `//` up to, not including, the line terminator.
    fn scan_comment(&mut self) -> Token {
        let bytes = self.text.as_bytes();
        let end = match memchr::memchr(b'\n', &bytes[self.pos..]) {
            Some(offset) => {
                let newline = self.pos + offset;
                if newline > self.pos + 2 && bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                }
            }
            None => self.text.len(),
        };
        self.pos = end;
        self.make_token(SyntaxKind::Comment)
    }

    /// One maximal run of non-newline whitespace.
    fn scan_whitespace(&mut self) -> Token {
        while let Some(ch) = self.current_char() {
            let starts_newline = ch == CARRIAGE_RETURN && self.next_char() == Some(LINE_FEED);
            if !is_inline_whitespace(ch) || starts_newline {
                break;
            }
            self.advance(ch);
        }
        self.make_token(SyntaxKind::Whitespace)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        lex(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_fixed_tokens() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("+-*/%<=:()[].."),
            vec![
                Plus, Minus, Asterisk, Slash, Percent, LessThan, Equals, Colon, OpenParen,
                CloseParen, OpenBracket, CloseBracket, DotDot, EndOfFile
            ]
        );
    }

    #[test]
    fn test_single_dot_is_unknown() {
        let result = lex("1.2");
        let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::NumberLiteral,
                SyntaxKind::Unknown,
                SyntaxKind::NumberLiteral,
                SyntaxKind::EndOfFile
            ]
        );
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("move Move @x a_1"),
            vec![
                MoveKeyword, Whitespace, Identifier, Whitespace, Identifier, Whitespace,
                Identifier, EndOfFile
            ]
        );
    }

    #[test]
    fn test_number_wraps() {
        let result = lex("2147483648");
        assert_eq!(result.tokens[0].integer_value(), Some(i32::MIN));
        assert!(!result.has_errors());
    }

    #[test]
    fn test_string_has_no_escapes() {
        let result = lex(r#""a\"b""#);
        assert_eq!(result.tokens[0].string_value(), Some("a\\"));
        assert_eq!(result.tokens[0].text, r#""a\""#);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let result = lex("\"abc\nx");
        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].string_value(), Some("abc\nx"));
        assert_eq!(result.diagnostics.diagnostics()[0].code, "RL0005");
    }

    #[test]
    fn test_comment_stops_before_crlf() {
        use SyntaxKind::*;
        let result = lex("// hi\r\nx");
        assert_eq!(
            result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Comment, NewLine, Identifier, EndOfFile]
        );
        assert_eq!(result.tokens[0].text, "// hi");
        assert_eq!(result.tokens[1].text, "\r\n");
    }

    #[test]
    fn test_lone_carriage_return_is_whitespace() {
        use SyntaxKind::*;
        assert_eq!(kinds(" \r\t\r\n"), vec![Whitespace, NewLine, EndOfFile]);
    }

    #[test]
    fn test_unknown_characters() {
        let result = lex("&$");
        assert_eq!(result.tokens.len(), 3);
        let spans: Vec<_> = result.diagnostics.iter().map(|d| d.span).collect();
        assert_eq!(spans, vec![Some(TextSpan::new(0, 1)), Some(TextSpan::new(1, 1))]);
        assert!(result.diagnostics.iter().all(|d| d.code == "RL0001"));
        assert_eq!(result.tokens[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_multibyte_unknown_character() {
        let result = lex("€");
        assert_eq!(result.tokens[0].span, TextSpan::new(0, 3));
        assert_eq!(result.tokens[1].span, TextSpan::empty(3));
        assert_eq!(result.diagnostics.diagnostics()[0].message, "Unexpected character '€'.");
    }

    #[test]
    fn test_iterator_stops_after_end_of_file() {
        let tokens: Vec<_> = Lexer::new("a").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, SyntaxKind::EndOfFile);
    }
}
