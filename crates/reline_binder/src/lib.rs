//! reline_binder: Semantic binding of Reline syntax trees.
//!
//! Binding runs in two passes over one syntax tree. `declare` numbers the
//! lines and forward-declares labels, variables and functions, evaluating
//! each function's constant line range. `bind_declared` then binds every
//! statement and expression into the symbol model. `bind` runs both.

mod binder;
mod error;
mod flags;

pub use binder::{Binder, DeclaredSymbols};
pub use error::BindError;
pub use flags::BindingFlags;

use reline_symbols::SymbolTree;
use reline_syntax::SyntaxTree;

/// Pass 1: number lines and declare every named symbol.
pub fn declare(tree: &SyntaxTree<'_>) -> Result<DeclaredSymbols, BindError> {
    let mut binder = Binder::new(tree);
    binder.declare_program()?;
    Ok(binder.into_declared())
}

/// Pass 2: bind every statement against the declarations of pass 1.
pub fn bind_declared(
    tree: &SyntaxTree<'_>,
    declared: DeclaredSymbols,
) -> Result<SymbolTree, BindError> {
    let mut binder = Binder::from_declared(tree, declared)?;
    binder.bind_program()?;
    Ok(binder.finish())
}

/// Bind a syntax tree into a symbol tree.
pub fn bind(tree: &SyntaxTree<'_>) -> Result<SymbolTree, BindError> {
    let declared = declare(tree)?;
    bind_declared(tree, declared)
}
