//! A trivia-transparent cursor over the lexer's token stream.

use reline_syntax::{SyntaxKind, Token};

/// Hands out significant tokens with their trivia attached.
///
/// Trivia (whitespace, comments, unknown characters) before a token becomes
/// its leading trivia, except trivia between a token and the end of its
/// line, which becomes that token's trailing trivia. Lookahead and advance
/// never see trivia.
#[derive(Debug, Clone)]
pub struct TokenViewer {
    /// Significant tokens in reverse order; the last element is current.
    /// The first element is always `EndOfFile`.
    pending: Vec<Token>,
}

impl TokenViewer {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut significant: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut trivia: Vec<Token> = Vec::new();
        let mut end = 0;

        for token in tokens {
            end = token.span.end();
            if token.kind.is_trivia() {
                trivia.push(token);
                continue;
            }
            let mut token = token;
            if !trivia.is_empty() {
                match significant.last_mut() {
                    Some(previous)
                        if token.kind.is_line_terminator()
                            && !previous.kind.is_line_terminator() =>
                    {
                        previous.trailing_trivia.append(&mut trivia);
                    }
                    _ => token.leading_trivia.append(&mut trivia),
                }
            }
            let is_end = token.kind == SyntaxKind::EndOfFile;
            significant.push(token);
            if is_end {
                break;
            }
        }

        if significant.last().map(|t| t.kind) != Some(SyntaxKind::EndOfFile) {
            let mut eof = Token::missing(SyntaxKind::EndOfFile, end);
            eof.leading_trivia = trivia;
            significant.push(eof);
        }

        significant.reverse();
        Self {
            pending: significant,
        }
    }

    /// The current significant token.
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    #[inline]
    pub fn current_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    /// The significant token `offset` places ahead; `EndOfFile` past the end.
    pub fn peek(&self, offset: usize) -> &Token {
        let len = self.pending.len();
        let index = len.saturating_sub(offset + 1);
        &self.pending[index]
    }

    /// Take the current token and move to the next one. At `EndOfFile` the
    /// cursor stays put and a copy of `EndOfFile` is returned.
    pub fn advance(&mut self) -> Token {
        if self.pending.len() > 1 {
            if let Some(token) = self.pending.pop() {
                return token;
            }
        }
        self.current().clone()
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == SyntaxKind::EndOfFile
    }
}
