//! Symbol tree construction errors.

use thiserror::Error;

/// Contract violations when assembling a symbol tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("line {0} has already been populated")]
    LineAlreadyPopulated(u32),

    #[error("line {line} has already been bound to a statement")]
    StatementAlreadyBound { line: u32 },

    #[error("line {line} is outside the program's 1..={count} lines")]
    LineOutOfRange { line: u32, count: u32 },
}
