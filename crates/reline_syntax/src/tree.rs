//! The parse result: a program root, its diagnostics, and a lazily built
//! index for parent and ancestor queries.

use crate::node::*;
use crate::token::Token;
use crate::visitor::{for_each_child, for_each_token};
use reline_core::collections::FxMap;
use reline_core::publish::get_or_publish;
use reline_core::text::TextSpan;
use reline_diagnostics::DiagnosticBag;
use std::sync::OnceLock;

/// A reference to any syntax node.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNodeRef<'a> {
    Program(&'a Program<'a>),
    Line(&'a Line<'a>),
    Label(&'a Label),
    ParameterList(&'a ParameterList<'a>),
    Statement(&'a Statement<'a>),
    Expression(&'a Expression<'a>),
}

impl<'a> SyntaxNodeRef<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            SyntaxNodeRef::Program(n) => n.id,
            SyntaxNodeRef::Line(n) => n.id,
            SyntaxNodeRef::Label(n) => n.id,
            SyntaxNodeRef::ParameterList(n) => n.id,
            SyntaxNodeRef::Statement(n) => n.id(),
            SyntaxNodeRef::Expression(n) => n.id(),
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            SyntaxNodeRef::Program(n) => n.span(),
            SyntaxNodeRef::Line(n) => n.span(),
            SyntaxNodeRef::Label(n) => n.span(),
            SyntaxNodeRef::ParameterList(n) => n.span(),
            SyntaxNodeRef::Statement(n) => n.span(),
            SyntaxNodeRef::Expression(n) => n.span(),
        }
    }

    pub fn as_line(&self) -> Option<&'a Line<'a>> {
        match *self {
            SyntaxNodeRef::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Node id → node and node id → parent id maps for one tree.
#[derive(Debug)]
pub struct SyntaxIndex<'a> {
    nodes: FxMap<NodeId, SyntaxNodeRef<'a>>,
    parents: FxMap<NodeId, NodeId>,
}

impl<'a> SyntaxIndex<'a> {
    pub fn build(root: &'a Program<'a>) -> Self {
        let mut nodes = FxMap::default();
        let mut parents = FxMap::default();
        let mut stack = vec![SyntaxNodeRef::Program(root)];
        while let Some(node) = stack.pop() {
            let id = node.id();
            nodes.insert(id, node);
            for_each_child(node, |child| {
                parents.insert(child.id(), id);
                stack.push(child);
            });
        }
        Self { nodes, parents }
    }

    pub fn node(&self, id: NodeId) -> Option<SyntaxNodeRef<'a>> {
        self.nodes.get(&id).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<SyntaxNodeRef<'a>> {
        self.parents.get(&id).and_then(|parent| self.node(*parent))
    }

    /// Ancestors of `id`, nearest first. Does not include the node itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = SyntaxNodeRef<'a>> + '_ {
        std::iter::successors(self.parent(id), move |node| self.parent(node.id()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A parsed program together with its parse diagnostics.
#[derive(Debug)]
pub struct SyntaxTree<'a> {
    root: &'a Program<'a>,
    diagnostics: DiagnosticBag,
    index: OnceLock<SyntaxIndex<'a>>,
}

impl<'a> SyntaxTree<'a> {
    pub fn new(root: &'a Program<'a>, diagnostics: DiagnosticBag) -> Self {
        Self {
            root,
            diagnostics,
            index: OnceLock::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> &'a Program<'a> {
        self.root
    }

    pub fn lines(&self) -> &'a [Line<'a>] {
        self.root.lines
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The node index, built on first use.
    pub fn index(&self) -> &SyntaxIndex<'a> {
        get_or_publish(&self.index, || SyntaxIndex::build(self.root))
    }

    /// The line containing the node `id`.
    pub fn enclosing_line(&self, id: NodeId) -> Option<&'a Line<'a>> {
        let index = self.index();
        if let Some(line) = index.node(id).and_then(|n| n.as_line()) {
            return Some(line);
        }
        index.ancestors(id).find_map(|n| n.as_line())
    }

    /// Every token of the tree in source order, trivia not expanded.
    pub fn tokens(&self) -> Vec<&'a Token> {
        let mut tokens = Vec::new();
        for_each_token(SyntaxNodeRef::Program(self.root), &mut |t| tokens.push(t));
        tokens
    }

    /// Reconstruct the source text from the tree's tokens and trivia.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for token in self.tokens() {
            token.write_full_text(&mut text);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::SyntaxKind;
    use bumpalo::Bump;

    fn token(kind: SyntaxKind, start: u32, text: &str) -> Token {
        Token::new(kind, TextSpan::new(start, text.len() as u32), text)
    }

    /// Builds the tree for `a: Write (1)` by hand.
    fn sample<'a>(bump: &'a Bump) -> &'a Program<'a> {
        let argument = Expression::Literal(LiteralExpression {
            id: NodeId(0),
            token: token(SyntaxKind::NumberLiteral, 10, "1"),
        });
        let arguments = bump.alloc_slice_fill_iter([argument]);
        let invocation = bump.alloc(Expression::Invocation(InvocationExpression {
            id: NodeId(1),
            identifier: token(SyntaxKind::Identifier, 3, "Write"),
            open: token(SyntaxKind::OpenParen, 9, "("),
            arguments,
            close: token(SyntaxKind::CloseParen, 11, ")"),
        }));
        let statement = bump.alloc(Statement::Expression(ExpressionStatement {
            id: NodeId(2),
            expression: invocation,
        }));
        let label = bump.alloc(Label {
            id: NodeId(3),
            identifier: token(SyntaxKind::Identifier, 0, "a"),
            colon: token(SyntaxKind::Colon, 1, ":"),
        });
        let lines = bump.alloc_slice_fill_iter([Line {
            id: NodeId(4),
            label: Some(label),
            statement: Some(statement),
            terminator: Token::missing(SyntaxKind::EndOfFile, 12),
        }]);
        bump.alloc(Program { id: NodeId(5), lines })
    }

    #[test]
    fn test_index_parent_and_ancestors() {
        let bump = Bump::new();
        let tree = SyntaxTree::new(sample(&bump), DiagnosticBag::new());

        assert_eq!(tree.index().len(), 6);
        assert_eq!(tree.index().parent(NodeId(0)).map(|n| n.id()), Some(NodeId(1)));
        let chain: Vec<_> = tree.index().ancestors(NodeId(0)).map(|n| n.id()).collect();
        assert_eq!(chain, vec![NodeId(1), NodeId(2), NodeId(4), NodeId(5)]);
        assert!(tree.index().parent(NodeId(5)).is_none());
    }

    #[test]
    fn test_enclosing_line() {
        let bump = Bump::new();
        let tree = SyntaxTree::new(sample(&bump), DiagnosticBag::new());
        assert_eq!(tree.enclosing_line(NodeId(0)).map(|l| l.id), Some(NodeId(4)));
        assert_eq!(tree.enclosing_line(NodeId(4)).map(|l| l.id), Some(NodeId(4)));
        assert!(tree.enclosing_line(NodeId(5)).is_none());
    }

    #[test]
    fn test_line_span_starts_at_label() {
        let bump = Bump::new();
        let program = sample(&bump);
        assert_eq!(program.lines[0].span(), TextSpan::from_bounds(0, 12));
        assert_eq!(program.span(), TextSpan::from_bounds(0, 12));
    }

    #[test]
    fn test_tokens_in_source_order() {
        let bump = Bump::new();
        let tree = SyntaxTree::new(sample(&bump), DiagnosticBag::new());
        let texts: Vec<_> = tree.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", ":", "Write", "(", "1", ")", ""]);
        assert_eq!(tree.full_text(), "a:Write(1)");
    }
}
