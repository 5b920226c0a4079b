//! The Reline parser implementation.
//!
//! A recursive descent parser over a [`TokenViewer`]. Every node gets a
//! `NodeId` from a counter as it is built, so ids follow parse order.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use reline_core::arena::CompilerArena;
use reline_diagnostics::{messages, DiagnosticBag, DiagnosticDescription};
use reline_syntax::node::*;
use reline_syntax::{SyntaxKind, SyntaxTree, Token};

use crate::error::ParseError;
use crate::precedence::{binary_operator_precedence, OperatorPrecedence};
use crate::viewer::TokenViewer;

/// Maximum expression nesting depth to prevent stack overflow on deeply
/// nested input. Groupings, pointers, unary operators and repeated range
/// operators each count as one level.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Parse a token stream into a syntax tree allocated in `arena`.
///
/// Fails if any token carries an Error-level lexer diagnostic.
pub fn parse<'a>(
    arena: &'a CompilerArena,
    tokens: Vec<Token>,
) -> Result<SyntaxTree<'a>, ParseError> {
    let count = tokens.iter().filter(|t| t.has_errors()).count();
    if count > 0 {
        return Err(ParseError::LexerDiagnostics { count });
    }
    Ok(Parser::new(arena.bump(), tokens).parse_program())
}

/// Lex and parse source text.
pub fn parse_text<'a>(
    arena: &'a CompilerArena,
    source: &str,
) -> Result<SyntaxTree<'a>, ParseError> {
    parse(arena, reline_lexer::lex(source).tokens)
}

/// Builds a `SyntaxTree` from significant tokens.
pub struct Parser<'a> {
    arena: &'a Bump,
    viewer: TokenViewer,
    diagnostics: DiagnosticBag,
    next_id: u32,
    /// Tracks expression nesting to bound recursion on deeply nested input.
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, tokens: Vec<Token>) -> Self {
        Self {
            arena,
            viewer: TokenViewer::new(tokens),
            diagnostics: DiagnosticBag::new(),
            next_id: 0,
            recursion_depth: 0,
        }
    }

    /// Parse lines until the line terminated by `EndOfFile`.
    pub fn parse_program(mut self) -> SyntaxTree<'a> {
        let mut lines = BumpVec::new_in(self.arena);
        loop {
            let line = self.parse_line();
            let done = line.terminator.kind == SyntaxKind::EndOfFile;
            lines.push(line);
            if done {
                break;
            }
        }
        let id = self.alloc_id();
        let program = self.arena.alloc(Program {
            id,
            lines: lines.into_bump_slice(),
        });
        SyntaxTree::new(program, self.diagnostics)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    #[inline]
    fn current_kind(&self) -> SyntaxKind {
        self.viewer.current_kind()
    }

    #[inline]
    fn at_line_end(&self) -> bool {
        self.current_kind().is_line_terminator()
    }

    fn report_at_current(&mut self, description: &DiagnosticDescription, args: &[&str]) {
        let span = self.viewer.current().span;
        self.diagnostics.report(span, description, args);
    }

    /// Consume a token of `kind`, or report `RL0007` and synthesize a
    /// zero-width one without consuming anything.
    fn expect_token(&mut self, kind: SyntaxKind) -> Token {
        if self.current_kind() == kind {
            return self.viewer.advance();
        }
        let current = self.viewer.current();
        let (span, found) = (current.span, current.display_text().to_string());
        self.diagnostics.report(
            span,
            &messages::EXPECTED_0_BUT_FOUND_1,
            &[kind.description(), found.as_str()],
        );
        Token::missing(kind, span.start)
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn parse_line(&mut self) -> Line<'a> {
        let label = if self.current_kind() == SyntaxKind::Identifier
            && self.viewer.peek(1).kind == SyntaxKind::Colon
        {
            let identifier = self.viewer.advance();
            let colon = self.viewer.advance();
            let id = self.alloc_id();
            let label: &'a Label = self.arena.alloc(Label {
                id,
                identifier,
                colon,
            });
            Some(label)
        } else {
            None
        };

        let statement = if self.at_line_end() {
            None
        } else {
            let statement = self.parse_statement();
            let statement: &'a Statement<'a> = self.arena.alloc(statement);
            Some(statement)
        };

        let terminator = if self.at_line_end() {
            self.viewer.advance()
        } else {
            let current = self.viewer.current();
            let (span, found) = (current.span, current.display_text().to_string());
            self.diagnostics.report(
                span,
                &messages::EXPECTED_END_OF_LINE_BUT_FOUND_0,
                &[found.as_str()],
            );
            Token::missing(SyntaxKind::Unknown, span.start)
        };

        Line {
            id: self.alloc_id(),
            label,
            statement,
            terminator,
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Statement<'a> {
        match self.current_kind() {
            SyntaxKind::MoveKeyword => Statement::Move(self.parse_manipulation_statement()),
            SyntaxKind::SwapKeyword => Statement::Swap(self.parse_manipulation_statement()),
            SyntaxKind::CopyKeyword => Statement::Copy(self.parse_manipulation_statement()),
            SyntaxKind::ReturnKeyword => {
                let keyword = self.viewer.advance();
                let expression = self.parse_expression_ref();
                Statement::Return(ReturnStatement {
                    id: self.alloc_id(),
                    keyword,
                    expression,
                })
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::Identifier if self.viewer.peek(1).kind == SyntaxKind::Equals => {
                let identifier = self.viewer.advance();
                let equals = self.viewer.advance();
                let expression = self.parse_expression_ref();
                Statement::Assignment(AssignmentStatement {
                    id: self.alloc_id(),
                    identifier,
                    equals,
                    expression,
                })
            }
            _ => {
                let expression = self.parse_expression_ref();
                if expression.as_invocation().is_none() {
                    self.diagnostics.report(
                        expression.span(),
                        &messages::ONLY_INVOCATIONS_AS_STATEMENT,
                        &[],
                    );
                }
                Statement::Expression(ExpressionStatement {
                    id: self.alloc_id(),
                    expression,
                })
            }
        }
    }

    /// `move`/`copy` take `to`; `swap` takes `with`. The other connector is
    /// accepted with a diagnostic.
    fn parse_manipulation_statement(&mut self) -> ManipulationStatement<'a> {
        let keyword = self.viewer.advance();
        let expected = if keyword.kind == SyntaxKind::SwapKeyword {
            SyntaxKind::WithKeyword
        } else {
            SyntaxKind::ToKeyword
        };
        let source = self.parse_expression_ref();
        let connector = match self.current_kind() {
            SyntaxKind::ToKeyword | SyntaxKind::WithKeyword => {
                let connector = self.viewer.advance();
                if connector.kind != expected {
                    self.diagnostics.report(
                        connector.span,
                        &messages::EXPECTED_0_BUT_FOUND_1,
                        &[expected.description(), connector.text.as_str()],
                    );
                }
                connector
            }
            _ => self.expect_token(expected),
        };
        let target = self.parse_expression_ref();
        ManipulationStatement {
            id: self.alloc_id(),
            keyword,
            source,
            connector,
            target,
        }
    }

    fn parse_function_declaration(&mut self) -> Statement<'a> {
        let keyword = self.viewer.advance();
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let body = self.parse_expression_ref();
        let parameters = if self.current_kind() == SyntaxKind::OpenParen {
            let list = self.parse_parameter_list();
            let list: &'a ParameterList<'a> = self.arena.alloc(list);
            Some(list)
        } else {
            None
        };
        Statement::FunctionDeclaration(FunctionDeclarationStatement {
            id: self.alloc_id(),
            keyword,
            identifier,
            body,
            parameters,
        })
    }

    fn parse_parameter_list(&mut self) -> ParameterList<'a> {
        let open = self.viewer.advance();
        let mut identifiers = BumpVec::new_in(self.arena);
        while self.current_kind() == SyntaxKind::Identifier {
            identifiers.push(self.viewer.advance());
        }
        let close = self.expect_token(SyntaxKind::CloseParen);
        ParameterList {
            id: self.alloc_id(),
            open,
            identifiers: identifiers.into_bump_slice(),
            close,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression_ref(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.arena.alloc(expression)
    }

    pub fn parse_expression(&mut self) -> Expression<'a> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return self.parse_invalid_term();
        }
        self.recursion_depth += 1;
        let expression = self.parse_binary_expression(OperatorPrecedence::Range);
        self.recursion_depth -= 1;
        expression
    }

    fn parse_binary_expression(&mut self, precedence: OperatorPrecedence) -> Expression<'a> {
        if precedence >= OperatorPrecedence::Unary {
            return self.parse_unary_expression();
        }
        let operand_precedence = precedence.next();
        let mut left = self.parse_binary_expression(operand_precedence);

        // Each repetition deepens the left operand, so it counts as a level.
        let depth = self.recursion_depth;
        while binary_operator_precedence(self.current_kind()) == precedence {
            if self.recursion_depth >= MAX_RECURSION_DEPTH {
                let found = self.viewer.current().display_text().to_string();
                self.report_at_current(&messages::INVALID_EXPRESSION_TERM_0, &[found.as_str()]);
                break;
            }
            let operator = self.viewer.advance();
            let right = self.parse_binary_expression(operand_precedence);
            let left_ref = self.arena.alloc(left);
            let right_ref = self.arena.alloc(right);
            left = Expression::Binary(BinaryExpression {
                id: self.alloc_id(),
                left: left_ref,
                operator,
                right: right_ref,
            });
            if !precedence.is_repeating() {
                break;
            }
            self.recursion_depth += 1;
        }
        self.recursion_depth = depth;

        left
    }

    fn parse_unary_expression(&mut self) -> Expression<'a> {
        match self.current_kind() {
            SyntaxKind::Plus | SyntaxKind::Minus => {
                if self.recursion_depth >= MAX_RECURSION_DEPTH {
                    return self.parse_invalid_term();
                }
                let operator = self.viewer.advance();
                self.recursion_depth += 1;
                let operand = self.parse_unary_expression();
                self.recursion_depth -= 1;
                let operand_ref = self.arena.alloc(operand);
                Expression::Unary(UnaryExpression {
                    id: self.alloc_id(),
                    operator,
                    operand: operand_ref,
                })
            }
            SyntaxKind::Asterisk => self.parse_pointer_expression(),
            _ => self.parse_primary_expression(),
        }
    }

    /// `*ident` or `*[expr]`.
    fn parse_pointer_expression(&mut self) -> Expression<'a> {
        let asterisk = self.viewer.advance();
        if self.current_kind() == SyntaxKind::OpenBracket {
            let open = self.viewer.advance();
            let expression = self.parse_expression_ref();
            let close = self.expect_token(SyntaxKind::CloseBracket);
            return Expression::LinePointer(LinePointerExpression {
                id: self.alloc_id(),
                asterisk,
                open,
                expression,
                close,
            });
        }
        let identifier = self.expect_token(SyntaxKind::Identifier);
        Expression::FunctionPointer(FunctionPointerExpression {
            id: self.alloc_id(),
            asterisk,
            identifier,
        })
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        match self.current_kind() {
            SyntaxKind::HereKeyword | SyntaxKind::StartKeyword | SyntaxKind::EndKeyword => {
                let keyword = self.viewer.advance();
                Expression::Keyword(KeywordExpression {
                    id: self.alloc_id(),
                    keyword,
                })
            }
            SyntaxKind::NumberLiteral | SyntaxKind::StringLiteral => {
                let token = self.viewer.advance();
                Expression::Literal(LiteralExpression {
                    id: self.alloc_id(),
                    token,
                })
            }
            SyntaxKind::OpenParen => {
                let open = self.viewer.advance();
                let expression = self.parse_expression_ref();
                let close = self.expect_token(SyntaxKind::CloseParen);
                Expression::Grouping(GroupingExpression {
                    id: self.alloc_id(),
                    open,
                    expression,
                    close,
                })
            }
            SyntaxKind::Identifier if self.viewer.peek(1).kind == SyntaxKind::OpenParen => {
                self.parse_invocation_expression()
            }
            SyntaxKind::Identifier => {
                let identifier = self.viewer.advance();
                Expression::Identifier(IdentifierExpression {
                    id: self.alloc_id(),
                    identifier,
                })
            }
            _ => self.parse_invalid_term(),
        }
    }

    /// `ident (arg arg ...)`; arguments are separated by whitespace only.
    fn parse_invocation_expression(&mut self) -> Expression<'a> {
        let identifier = self.viewer.advance();
        let open = self.viewer.advance();
        let mut arguments = BumpVec::new_in(self.arena);
        while self.current_kind() != SyntaxKind::CloseParen && !self.at_line_end() {
            let argument = self.parse_expression();
            arguments.push(argument);
        }
        let close = self.expect_token(SyntaxKind::CloseParen);
        Expression::Invocation(InvocationExpression {
            id: self.alloc_id(),
            identifier,
            open,
            arguments: arguments.into_bump_slice(),
            close,
        })
    }

    /// Report `RL0002` and wrap the offending token as an `Unknown`
    /// identifier. Line terminators are left for the line to consume.
    fn parse_invalid_term(&mut self) -> Expression<'a> {
        let found = self.viewer.current().display_text().to_string();
        self.report_at_current(&messages::INVALID_EXPRESSION_TERM_0, &[found.as_str()]);
        let identifier = if self.at_line_end() {
            Token::missing(SyntaxKind::Unknown, self.viewer.current().span.start)
        } else {
            let mut token = self.viewer.advance();
            token.kind = SyntaxKind::Unknown;
            token
        };
        Expression::Identifier(IdentifierExpression {
            id: self.alloc_id(),
            identifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok<'a>(arena: &'a CompilerArena, source: &str) -> SyntaxTree<'a> {
        parse_text(arena, source).expect("source has no lexer errors")
    }

    fn codes(tree: &SyntaxTree<'_>) -> Vec<&'static str> {
        tree.diagnostics().iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_newlines_give_one_more_line() {
        let arena = CompilerArena::new();
        assert_eq!(parse_ok(&arena, "").lines().len(), 1);
        assert_eq!(parse_ok(&arena, "\n\n").lines().len(), 3);
    }

    #[test]
    fn test_lexer_errors_are_rejected() {
        let arena = CompilerArena::new();
        assert_eq!(
            parse_text(&arena, "a = 1 $").err(),
            Some(ParseError::LexerDiagnostics { count: 1 })
        );
    }

    #[test]
    fn test_additive_applies_once() {
        let arena = CompilerArena::new();
        let tree = parse_ok(&arena, "x = 1+2+3");
        assert_eq!(tree.lines().len(), 2);
        assert_eq!(codes(&tree), vec!["RL0006", "RL0003"]);
        assert!(tree.lines()[0].terminator.is_missing());
    }

    #[test]
    fn test_range_chains() {
        let arena = CompilerArena::new();
        let tree = parse_ok(&arena, "x = 1..2..3");
        assert!(codes(&tree).is_empty());
        let Some(Statement::Assignment(assignment)) = tree.lines()[0].statement else {
            panic!("expected an assignment");
        };
        let Expression::Binary(outer) = assignment.expression else {
            panic!("expected a range");
        };
        assert!(matches!(outer.left, Expression::Binary(_)));
        assert!(matches!(outer.right, Expression::Literal(_)));
    }

    #[test]
    fn test_ids_follow_parse_order() {
        let arena = CompilerArena::new();
        let tree = parse_ok(&arena, "Write (1)");
        let line = &tree.lines()[0];
        assert_eq!(tree.root().id, NodeId(4));
        assert_eq!(line.id, NodeId(3));
        assert_eq!(line.statement.map(|s| s.id()), Some(NodeId(2)));
    }
}
