//! Bound statements.

use crate::ids::{ExpressionId, FunctionId, VariableId};
use reline_core::TextSpan;
use reline_syntax::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulationOperands {
    pub source: ExpressionId,
    pub target: ExpressionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Bad,
    Expression(ExpressionId),
    Assignment {
        variable: VariableId,
        value: ExpressionId,
    },
    Move(ManipulationOperands),
    Swap(ManipulationOperands),
    Copy(ManipulationOperands),
    /// The body lives on the function symbol.
    FunctionDeclaration(FunctionId),
    Return {
        function: Option<FunctionId>,
        value: ExpressionId,
    },
}

impl StatementKind {
    /// Expressions owned directly by the statement.
    pub fn children(&self) -> Vec<ExpressionId> {
        match self {
            StatementKind::Expression(expression) => vec![*expression],
            StatementKind::Assignment { value, .. } | StatementKind::Return { value, .. } => {
                vec![*value]
            }
            StatementKind::Move(operands)
            | StatementKind::Swap(operands)
            | StatementKind::Copy(operands) => vec![operands.source, operands.target],
            StatementKind::Bad | StatementKind::FunctionDeclaration(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSymbol {
    pub syntax: Option<NodeId>,
    pub span: TextSpan,
    pub line: u32,
    pub kind: StatementKind,
}
