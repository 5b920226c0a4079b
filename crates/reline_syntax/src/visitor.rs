//! Generic traversal over syntax nodes.
//!
//! `for_each_child` iterates the direct child nodes of any node, and
//! `for_each_token` yields every token of a subtree in source order.

use crate::node::*;
use crate::token::Token;
use crate::tree::SyntaxNodeRef;

/// Call `f` for each direct child node of `node`, in source order.
pub fn for_each_child<'a, F>(node: SyntaxNodeRef<'a>, mut f: F)
where
    F: FnMut(SyntaxNodeRef<'a>),
{
    match node {
        SyntaxNodeRef::Program(program) => {
            for line in program.lines {
                f(SyntaxNodeRef::Line(line));
            }
        }
        SyntaxNodeRef::Line(line) => {
            if let Some(label) = line.label {
                f(SyntaxNodeRef::Label(label));
            }
            if let Some(statement) = line.statement {
                f(SyntaxNodeRef::Statement(statement));
            }
        }
        SyntaxNodeRef::Label(_) => {}
        SyntaxNodeRef::ParameterList(_) => {}
        SyntaxNodeRef::Statement(statement) => match statement {
            Statement::Expression(n) => f(SyntaxNodeRef::Expression(n.expression)),
            Statement::Assignment(n) => f(SyntaxNodeRef::Expression(n.expression)),
            Statement::Move(n) | Statement::Swap(n) | Statement::Copy(n) => {
                f(SyntaxNodeRef::Expression(n.source));
                f(SyntaxNodeRef::Expression(n.target));
            }
            Statement::FunctionDeclaration(n) => {
                f(SyntaxNodeRef::Expression(n.body));
                if let Some(parameters) = n.parameters {
                    f(SyntaxNodeRef::ParameterList(parameters));
                }
            }
            Statement::Return(n) => f(SyntaxNodeRef::Expression(n.expression)),
        },
        SyntaxNodeRef::Expression(expression) => match expression {
            Expression::Unary(n) => f(SyntaxNodeRef::Expression(n.operand)),
            Expression::Binary(n) => {
                f(SyntaxNodeRef::Expression(n.left));
                f(SyntaxNodeRef::Expression(n.right));
            }
            Expression::Grouping(n) => f(SyntaxNodeRef::Expression(n.expression)),
            Expression::Invocation(n) => {
                for argument in n.arguments {
                    f(SyntaxNodeRef::Expression(argument));
                }
            }
            Expression::LinePointer(n) => f(SyntaxNodeRef::Expression(n.expression)),
            Expression::Keyword(_)
            | Expression::Literal(_)
            | Expression::Identifier(_)
            | Expression::FunctionPointer(_) => {}
        },
    }
}

/// Call `f` for every token in the subtree rooted at `node`, in source order.
pub fn for_each_token<'a, F>(node: SyntaxNodeRef<'a>, f: &mut F)
where
    F: FnMut(&'a Token),
{
    match node {
        SyntaxNodeRef::Program(program) => {
            for line in program.lines {
                for_each_token(SyntaxNodeRef::Line(line), f);
            }
        }
        SyntaxNodeRef::Line(line) => {
            if let Some(label) = line.label {
                for_each_token(SyntaxNodeRef::Label(label), f);
            }
            if let Some(statement) = line.statement {
                for_each_token(SyntaxNodeRef::Statement(statement), f);
            }
            f(&line.terminator);
        }
        SyntaxNodeRef::Label(label) => {
            f(&label.identifier);
            f(&label.colon);
        }
        SyntaxNodeRef::ParameterList(list) => {
            f(&list.open);
            for identifier in list.identifiers {
                f(identifier);
            }
            f(&list.close);
        }
        SyntaxNodeRef::Statement(statement) => statement_tokens(statement, f),
        SyntaxNodeRef::Expression(expression) => expression_tokens(expression, f),
    }
}

fn statement_tokens<'a, F>(statement: &'a Statement<'a>, f: &mut F)
where
    F: FnMut(&'a Token),
{
    match statement {
        Statement::Expression(n) => expression_tokens(n.expression, f),
        Statement::Assignment(n) => {
            f(&n.identifier);
            f(&n.equals);
            expression_tokens(n.expression, f);
        }
        Statement::Move(n) | Statement::Swap(n) | Statement::Copy(n) => {
            f(&n.keyword);
            expression_tokens(n.source, f);
            f(&n.connector);
            expression_tokens(n.target, f);
        }
        Statement::FunctionDeclaration(n) => {
            f(&n.keyword);
            f(&n.identifier);
            expression_tokens(n.body, f);
            if let Some(parameters) = n.parameters {
                for_each_token(SyntaxNodeRef::ParameterList(parameters), f);
            }
        }
        Statement::Return(n) => {
            f(&n.keyword);
            expression_tokens(n.expression, f);
        }
    }
}

fn expression_tokens<'a, F>(expression: &'a Expression<'a>, f: &mut F)
where
    F: FnMut(&'a Token),
{
    match expression {
        Expression::Unary(n) => {
            f(&n.operator);
            expression_tokens(n.operand, f);
        }
        Expression::Binary(n) => {
            expression_tokens(n.left, f);
            f(&n.operator);
            expression_tokens(n.right, f);
        }
        Expression::Keyword(n) => f(&n.keyword),
        Expression::Literal(n) => f(&n.token),
        Expression::Grouping(n) => {
            f(&n.open);
            expression_tokens(n.expression, f);
            f(&n.close);
        }
        Expression::Identifier(n) => f(&n.identifier),
        Expression::Invocation(n) => {
            f(&n.identifier);
            f(&n.open);
            for argument in n.arguments {
                expression_tokens(argument, f);
            }
            f(&n.close);
        }
        Expression::FunctionPointer(n) => {
            f(&n.asterisk);
            f(&n.identifier);
        }
        Expression::LinePointer(n) => {
            f(&n.asterisk);
            f(&n.open);
            expression_tokens(n.expression, f);
            f(&n.close);
        }
    }
}
