//! reline_symbols: The bound symbol model.
//!
//! A `SymbolTree` mirrors a syntax tree with resolved meaning: every line,
//! statement and expression becomes a typed symbol stored in a
//! `SymbolArena` and addressed by a typed id. Identifiable symbols (labels,
//! variables, parameters, functions) are registered in declaration tables
//! and track the expressions that reference them.

mod arena;
mod error;
mod expression;
mod ids;
mod native;
mod program;
mod statement;
mod symbol;
mod tree;
mod types;
mod value;

pub use arena::SymbolArena;
pub use error::SymbolError;
pub use expression::{
    BinaryOperator, ExpressionKind, ExpressionSymbol, FunctionRef, LineKeyword, UnaryOperator,
};
pub use ids::{ExpressionId, FunctionId, LabelId, ParameterId, StatementId, VariableId};
pub use native::{NativeFunctionSymbol, NativeOpcode, NATIVE_FUNCTIONS};
pub use program::{LineSymbol, ProgramSymbol};
pub use statement::{ManipulationOperands, StatementKind, StatementSymbol};
pub use symbol::{
    FunctionSymbol, Identifiable, LabelSymbol, ParameterSymbol, SymbolRef, SymbolTables,
    VariableSymbol,
};
pub use tree::{SymbolParent, SymbolTree};
pub use types::SymbolType;
pub use value::{LiteralValue, RangeError, RangeValue};
