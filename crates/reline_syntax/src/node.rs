//! Syntax node definitions.
//!
//! Nodes are allocated in the caller's bump arena and reference their
//! children by `&'a` references. Every node carries a `NodeId` assigned in
//! parse order, so parsing the same text twice yields equal trees.

use crate::syntax_kind::SyntaxKind;
use crate::token::Token;
use reline_core::text::TextSpan;

/// Unique identifier of a syntax node within one tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Program and lines
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct Program<'a> {
    pub id: NodeId,
    pub lines: &'a [Line<'a>],
}

impl Program<'_> {
    pub fn span(&self) -> TextSpan {
        match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => first.span().union(&last.span()),
            _ => TextSpan::default(),
        }
    }
}

/// One numbered line of a program.
#[derive(Debug, PartialEq, Eq)]
pub struct Line<'a> {
    pub id: NodeId,
    pub label: Option<&'a Label>,
    pub statement: Option<&'a Statement<'a>>,
    /// A `NewLine` or `EndOfFile` token, or a missing `Unknown` token when
    /// the line was not properly terminated.
    pub terminator: Token,
}

impl Line<'_> {
    /// Covers the earliest of label, statement and terminator through the
    /// end of the terminator.
    pub fn span(&self) -> TextSpan {
        let start = self
            .label
            .map(|l| l.span().start)
            .or_else(|| self.statement.map(|s| s.span().start))
            .unwrap_or(self.terminator.span.start);
        TextSpan::from_bounds(start.min(self.terminator.span.start), self.terminator.span.end())
    }
}

/// `identifier ':'` at the start of a line.
#[derive(Debug, PartialEq, Eq)]
pub struct Label {
    pub id: NodeId,
    pub identifier: Token,
    pub colon: Token,
}

impl Label {
    pub fn name(&self) -> &str {
        &self.identifier.text
    }

    pub fn span(&self) -> TextSpan {
        self.identifier.span.union(&self.colon.span)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    Expression(ExpressionStatement<'a>),
    Assignment(AssignmentStatement<'a>),
    Move(ManipulationStatement<'a>),
    Swap(ManipulationStatement<'a>),
    Copy(ManipulationStatement<'a>),
    FunctionDeclaration(FunctionDeclarationStatement<'a>),
    Return(ReturnStatement<'a>),
}

impl Statement<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            Statement::Expression(n) => n.id,
            Statement::Assignment(n) => n.id,
            Statement::Move(n) | Statement::Swap(n) | Statement::Copy(n) => n.id,
            Statement::FunctionDeclaration(n) => n.id,
            Statement::Return(n) => n.id,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Statement::Expression(n) => n.expression.span(),
            Statement::Assignment(n) => n.identifier.span.union(&n.expression.span()),
            Statement::Move(n) | Statement::Swap(n) | Statement::Copy(n) => {
                n.keyword.span.union(&n.target.span())
            }
            Statement::FunctionDeclaration(n) => {
                let end = n.parameters.map_or(n.body.span(), |p| p.span());
                n.keyword.span.union(&end)
            }
            Statement::Return(n) => n.keyword.span.union(&n.expression.span()),
        }
    }
}

/// A bare function invocation used as a statement.
#[derive(Debug, PartialEq, Eq)]
pub struct ExpressionStatement<'a> {
    pub id: NodeId,
    pub expression: &'a Expression<'a>,
}

/// `identifier '=' expression`
#[derive(Debug, PartialEq, Eq)]
pub struct AssignmentStatement<'a> {
    pub id: NodeId,
    pub identifier: Token,
    pub equals: Token,
    pub expression: &'a Expression<'a>,
}

/// `move`/`copy` `source 'to' target`, or `swap source 'with' target`.
#[derive(Debug, PartialEq, Eq)]
pub struct ManipulationStatement<'a> {
    pub id: NodeId,
    pub keyword: Token,
    pub source: &'a Expression<'a>,
    pub connector: Token,
    pub target: &'a Expression<'a>,
}

impl ManipulationStatement<'_> {
    /// The connector keyword this statement's keyword requires.
    pub fn expected_connector(&self) -> SyntaxKind {
        if self.keyword.kind == SyntaxKind::SwapKeyword {
            SyntaxKind::WithKeyword
        } else {
            SyntaxKind::ToKeyword
        }
    }
}

/// `'function' identifier body ['(' identifier* ')']`
#[derive(Debug, PartialEq, Eq)]
pub struct FunctionDeclarationStatement<'a> {
    pub id: NodeId,
    pub keyword: Token,
    pub identifier: Token,
    pub body: &'a Expression<'a>,
    pub parameters: Option<&'a ParameterList<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParameterList<'a> {
    pub id: NodeId,
    pub open: Token,
    pub identifiers: &'a [Token],
    pub close: Token,
}

impl ParameterList<'_> {
    pub fn span(&self) -> TextSpan {
        self.open.span.union(&self.close.span)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReturnStatement<'a> {
    pub id: NodeId,
    pub keyword: Token,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub enum Expression<'a> {
    Unary(UnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Keyword(KeywordExpression),
    Literal(LiteralExpression),
    Grouping(GroupingExpression<'a>),
    Identifier(IdentifierExpression),
    Invocation(InvocationExpression<'a>),
    FunctionPointer(FunctionPointerExpression),
    LinePointer(LinePointerExpression<'a>),
}

impl Expression<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            Expression::Unary(n) => n.id,
            Expression::Binary(n) => n.id,
            Expression::Keyword(n) => n.id,
            Expression::Literal(n) => n.id,
            Expression::Grouping(n) => n.id,
            Expression::Identifier(n) => n.id,
            Expression::Invocation(n) => n.id,
            Expression::FunctionPointer(n) => n.id,
            Expression::LinePointer(n) => n.id,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Expression::Unary(n) => n.operator.span.union(&n.operand.span()),
            Expression::Binary(n) => n.left.span().union(&n.right.span()),
            Expression::Keyword(n) => n.keyword.span,
            Expression::Literal(n) => n.token.span,
            Expression::Grouping(n) => n.open.span.union(&n.close.span),
            Expression::Identifier(n) => n.identifier.span,
            Expression::Invocation(n) => n.identifier.span.union(&n.close.span),
            Expression::FunctionPointer(n) => n.asterisk.span.union(&n.identifier.span),
            Expression::LinePointer(n) => n.asterisk.span.union(&n.close.span),
        }
    }

    /// The invocation node, if this expression is a function invocation.
    pub fn as_invocation(&self) -> Option<&InvocationExpression<'_>> {
        match self {
            Expression::Invocation(n) => Some(n),
            _ => None,
        }
    }
}

/// `'+' operand`, `'-' operand`
#[derive(Debug, PartialEq, Eq)]
pub struct UnaryExpression<'a> {
    pub id: NodeId,
    pub operator: Token,
    pub operand: &'a Expression<'a>,
}

/// The operator token, not the node, decides the operation.
#[derive(Debug, PartialEq, Eq)]
pub struct BinaryExpression<'a> {
    pub id: NodeId,
    pub left: &'a Expression<'a>,
    pub operator: Token,
    pub right: &'a Expression<'a>,
}

/// `here`, `start` or `end`.
#[derive(Debug, PartialEq, Eq)]
pub struct KeywordExpression {
    pub id: NodeId,
    pub keyword: Token,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LiteralExpression {
    pub id: NodeId,
    pub token: Token,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GroupingExpression<'a> {
    pub id: NodeId,
    pub open: Token,
    pub expression: &'a Expression<'a>,
    pub close: Token,
}

/// A name reference. Also wraps the `Unknown` token of an invalid term.
#[derive(Debug, PartialEq, Eq)]
pub struct IdentifierExpression {
    pub id: NodeId,
    pub identifier: Token,
}

impl IdentifierExpression {
    pub fn name(&self) -> &str {
        &self.identifier.text
    }

    /// Whether this node stands in for an expression that failed to parse.
    pub fn is_invalid(&self) -> bool {
        self.identifier.kind != SyntaxKind::Identifier
    }
}

/// `identifier '(' argument* ')'`
#[derive(Debug, PartialEq, Eq)]
pub struct InvocationExpression<'a> {
    pub id: NodeId,
    pub identifier: Token,
    pub open: Token,
    pub arguments: &'a [Expression<'a>],
    pub close: Token,
}

impl InvocationExpression<'_> {
    pub fn name(&self) -> &str {
        &self.identifier.text
    }
}

/// `'*' identifier`
#[derive(Debug, PartialEq, Eq)]
pub struct FunctionPointerExpression {
    pub id: NodeId,
    pub asterisk: Token,
    pub identifier: Token,
}

/// `'*' '[' expression ']'`
#[derive(Debug, PartialEq, Eq)]
pub struct LinePointerExpression<'a> {
    pub id: NodeId,
    pub asterisk: Token,
    pub open: Token,
    pub expression: &'a Expression<'a>,
    pub close: Token,
}
