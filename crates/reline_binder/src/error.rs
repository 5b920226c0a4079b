//! Errors raised when the binder's own invariants break.

use reline_core::TextSpan;
use reline_evaluator::EvaluationError;
use reline_symbols::SymbolError;
use reline_syntax::{NodeId, SyntaxKind};
use thiserror::Error;

/// Internal errors of the binder. User mistakes are diagnostics, never
/// `BindError`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("'{0}' is not an operator")]
    UnknownOperator(SyntaxKind),

    #[error("literal at {0} has no value of its kind")]
    MalformedLiteral(TextSpan),

    #[error("constant evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("declarations were made for {declared} lines but the tree has {found}")]
    DeclarationMismatch { declared: u32, found: u32 },

    #[error("node {0:?} has no declaration from the declaration pass")]
    MissingDeclaration(NodeId),

    #[error("node {0:?} is not inside a line of this tree")]
    NodeOutsideTree(NodeId),
}
