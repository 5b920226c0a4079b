//! reline_lexer: Lexer for Reline source text.
//!
//! Converts source text into a flat token stream. Whitespace, comments and
//! unrecognized characters are kept in the stream as tokens, so the
//! concatenated token text always reproduces the source exactly. The stream
//! always ends with a zero-width `EndOfFile` token.

mod char_codes;
mod lexer;

pub use lexer::{lex, LexResult, Lexer};
