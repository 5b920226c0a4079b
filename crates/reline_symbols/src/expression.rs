//! Bound expressions.

use crate::ids::{ExpressionId, FunctionId, LabelId, ParameterId, VariableId};
use crate::native::NativeOpcode;
use crate::types::SymbolType;
use crate::value::LiteralValue;
use reline_core::TextSpan;
use reline_syntax::{NodeId, SyntaxKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Concatenation,
    Range,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::Plus => BinaryOperator::Addition,
            SyntaxKind::Minus => BinaryOperator::Subtraction,
            SyntaxKind::Asterisk => BinaryOperator::Multiplication,
            SyntaxKind::Slash => BinaryOperator::Division,
            SyntaxKind::Percent => BinaryOperator::Modulo,
            SyntaxKind::LessThan => BinaryOperator::Concatenation,
            SyntaxKind::DotDot => BinaryOperator::Range,
            _ => return None,
        })
    }

    pub fn text(self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Concatenation => "<",
            BinaryOperator::Range => "..",
        }
    }

    /// The result type for well-typed operands, or `None` when the operand
    /// types are not accepted.
    pub fn result_type(self, left: SymbolType, right: SymbolType) -> Option<SymbolType> {
        match self {
            BinaryOperator::Concatenation => {
                let accepts = |ty: SymbolType| {
                    ty.is_assignable_to(SymbolType::Number)
                        || ty.is_assignable_to(SymbolType::String)
                };
                (accepts(left) && accepts(right)).then_some(SymbolType::String)
            }
            BinaryOperator::Range => {
                let ok = left.is_assignable_to(SymbolType::Number)
                    && right.is_assignable_to(SymbolType::Number);
                ok.then_some(SymbolType::Range)
            }
            _ => {
                let ok = left.is_assignable_to(SymbolType::Number)
                    && right.is_assignable_to(SymbolType::Number);
                ok.then_some(SymbolType::Number)
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Identity,
    Negation,
}

impl UnaryOperator {
    pub fn from_token_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::Plus => Some(UnaryOperator::Identity),
            SyntaxKind::Minus => Some(UnaryOperator::Negation),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            UnaryOperator::Identity => "+",
            UnaryOperator::Negation => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKeyword {
    /// The line the expression sits on.
    Here,
    /// The first line.
    Start,
    /// The last line.
    End,
}

impl LineKeyword {
    pub fn from_token_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::HereKeyword => Some(LineKeyword::Here),
            SyntaxKind::StartKeyword => Some(LineKeyword::Start),
            SyntaxKind::EndKeyword => Some(LineKeyword::End),
            _ => None,
        }
    }
}

/// A user-defined or native function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionRef {
    User(FunctionId),
    Native(NativeOpcode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    /// Binding failed; a diagnostic has been recorded.
    Bad,
    Unary {
        operator: UnaryOperator,
        operand: ExpressionId,
    },
    Binary {
        left: ExpressionId,
        operator: BinaryOperator,
        right: ExpressionId,
    },
    Keyword(LineKeyword),
    Literal(LiteralValue),
    Grouping(ExpressionId),
    Label(LabelId),
    Variable(VariableId),
    Parameter(ParameterId),
    Invocation {
        function: FunctionRef,
        arguments: Vec<ExpressionId>,
    },
    FunctionPointer(FunctionRef),
    LinePointer(ExpressionId),
}

impl ExpressionKind {
    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<ExpressionId> {
        match self {
            ExpressionKind::Unary { operand, .. } => vec![*operand],
            ExpressionKind::Binary { left, right, .. } => vec![*left, *right],
            ExpressionKind::Grouping(inner) | ExpressionKind::LinePointer(inner) => vec![*inner],
            ExpressionKind::Invocation { arguments, .. } => arguments.clone(),
            _ => Vec::new(),
        }
    }
}

/// A bound expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSymbol {
    /// The syntax node this symbol was bound from; `None` only for
    /// synthesized bad expressions.
    pub syntax: Option<NodeId>,
    pub span: TextSpan,
    /// The number of the line the expression sits on.
    pub line: u32,
    pub ty: SymbolType,
    pub is_constant: bool,
    pub kind: ExpressionKind,
}

impl ExpressionSymbol {
    pub fn bad(syntax: Option<NodeId>, span: TextSpan, line: u32) -> Self {
        Self {
            syntax,
            span,
            line,
            ty: SymbolType::Error,
            is_constant: false,
            kind: ExpressionKind::Bad,
        }
    }

    pub fn is_bad(&self) -> bool {
        matches!(self.kind, ExpressionKind::Bad)
    }
}
