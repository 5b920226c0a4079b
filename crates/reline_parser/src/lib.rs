//! reline_parser: Recursive descent parser for Reline.
//!
//! Parses the lexer's token stream into an arena-allocated syntax tree.
//! Expressions are parsed by precedence climbing; malformed input is
//! reported as diagnostics on the tree and never aborts the parse.

mod error;
mod parser;
mod precedence;
mod viewer;

pub use error::ParseError;
pub use parser::{parse, parse_text, Parser};
pub use precedence::OperatorPrecedence;
pub use viewer::TokenViewer;
