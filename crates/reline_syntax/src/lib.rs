//! reline_syntax: Tokens and syntax tree definitions for Reline.
//!
//! Defines the `SyntaxKind` enum, the `Token` value type produced by the
//! lexer, the arena-allocated syntax nodes built by the parser, and the
//! `SyntaxTree` that owns a parse result together with its diagnostics.

pub mod node;
pub mod syntax_kind;
pub mod token;
pub mod tree;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use token::{Token, TokenValue};
pub use tree::{SyntaxIndex, SyntaxNodeRef, SyntaxTree};
