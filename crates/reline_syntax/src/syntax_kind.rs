//! SyntaxKind enum - every token kind produced by the lexer.

use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Operators and brackets
    // ========================================================================
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    LessThan,
    Equals,
    Colon,
    DotDot,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    // ========================================================================
    // Keywords
    // ========================================================================
    HereKeyword,
    StartKeyword,
    EndKeyword,
    MoveKeyword,
    SwapKeyword,
    CopyKeyword,
    ToKeyword,
    WithKeyword,
    ReturnKeyword,
    FunctionKeyword,

    // ========================================================================
    // Literals and names
    // ========================================================================
    NumberLiteral,
    StringLiteral,
    Identifier,

    // ========================================================================
    // Trivia and terminators
    // ========================================================================
    Whitespace,
    Comment,
    NewLine,
    Unknown,
    EndOfFile,
}

impl SyntaxKind {
    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= SyntaxKind::HereKeyword as u8 && v <= SyntaxKind::FunctionKeyword as u8
    }

    /// Whether this kind is one of the fixed operator or bracket tokens.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u8;
        v <= SyntaxKind::CloseBracket as u8
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, SyntaxKind::NumberLiteral | SyntaxKind::StringLiteral)
    }

    /// Whether the token viewer skips over this kind. Unknown characters
    /// are trivia: the lexer has already reported them.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::Comment | SyntaxKind::Unknown
        )
    }

    /// Whether this kind ends a line.
    #[inline]
    pub fn is_line_terminator(self) -> bool {
        matches!(self, SyntaxKind::NewLine | SyntaxKind::EndOfFile)
    }

    /// Whether this kind is `here`, `start` or `end`.
    #[inline]
    pub fn is_line_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::HereKeyword | SyntaxKind::StartKeyword | SyntaxKind::EndKeyword
        )
    }

    /// Look up a keyword kind from text. Keywords are case-sensitive.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "here" => Some(SyntaxKind::HereKeyword),
            "start" => Some(SyntaxKind::StartKeyword),
            "end" => Some(SyntaxKind::EndKeyword),
            "move" => Some(SyntaxKind::MoveKeyword),
            "swap" => Some(SyntaxKind::SwapKeyword),
            "copy" => Some(SyntaxKind::CopyKeyword),
            "to" => Some(SyntaxKind::ToKeyword),
            "with" => Some(SyntaxKind::WithKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            _ => None,
        }
    }

    /// The fixed source text of this kind, if it has one.
    pub fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::Plus => "+",
            SyntaxKind::Minus => "-",
            SyntaxKind::Asterisk => "*",
            SyntaxKind::Slash => "/",
            SyntaxKind::Percent => "%",
            SyntaxKind::LessThan => "<",
            SyntaxKind::Equals => "=",
            SyntaxKind::Colon => ":",
            SyntaxKind::DotDot => "..",
            SyntaxKind::OpenParen => "(",
            SyntaxKind::CloseParen => ")",
            SyntaxKind::OpenBracket => "[",
            SyntaxKind::CloseBracket => "]",
            SyntaxKind::HereKeyword => "here",
            SyntaxKind::StartKeyword => "start",
            SyntaxKind::EndKeyword => "end",
            SyntaxKind::MoveKeyword => "move",
            SyntaxKind::SwapKeyword => "swap",
            SyntaxKind::CopyKeyword => "copy",
            SyntaxKind::ToKeyword => "to",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::FunctionKeyword => "function",
            _ => return None,
        })
    }

    /// A short human-readable name, used when a token has no text to show.
    pub fn description(self) -> &'static str {
        match self {
            SyntaxKind::NumberLiteral => "number",
            SyntaxKind::StringLiteral => "string",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Comment => "comment",
            SyntaxKind::NewLine => "new line",
            SyntaxKind::Unknown => "unknown",
            SyntaxKind::EndOfFile => "end of file",
            other => other.fixed_text().unwrap_or("token"),
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
