//! The result of binding: the program, every symbol, the declaration
//! tables and the binding diagnostics.

use crate::arena::SymbolArena;
use crate::expression::ExpressionSymbol;
use crate::ids::{ExpressionId, StatementId};
use crate::native::NativeOpcode;
use crate::program::{LineSymbol, ProgramSymbol};
use crate::statement::{StatementKind, StatementSymbol};
use crate::symbol::{FunctionSymbol, LabelSymbol, SymbolRef, SymbolTables, VariableSymbol};
use reline_core::{get_or_publish, FxMap, MultiMap, StringInterner};
use reline_diagnostics::DiagnosticBag;
use std::sync::OnceLock;

/// The owner of an expression symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolParent {
    Expression(ExpressionId),
    Statement(StatementId),
}

#[derive(Debug, Default)]
struct ParentMap {
    expressions: FxMap<ExpressionId, SymbolParent>,
    statements: FxMap<StatementId, u32>,
}

impl ParentMap {
    fn build(program: &ProgramSymbol, arena: &SymbolArena) -> Self {
        let mut map = ParentMap::default();
        for line in program.lines() {
            if let Some(statement) = line.statement {
                map.statements.insert(statement, line.number);
            }
        }
        for (id, statement) in arena.statements() {
            let mut children = statement.kind.children();
            if let StatementKind::FunctionDeclaration(function) = statement.kind {
                children.extend(arena.function(function).body);
            }
            for child in children {
                map.expressions.insert(child, SymbolParent::Statement(id));
            }
        }
        for (id, expression) in arena.expressions() {
            for child in expression.kind.children() {
                map.expressions.insert(child, SymbolParent::Expression(id));
            }
        }
        map
    }
}

#[derive(Debug)]
pub struct SymbolTree {
    program: ProgramSymbol,
    arena: SymbolArena,
    tables: SymbolTables,
    interner: StringInterner,
    native_references: MultiMap<NativeOpcode, ExpressionId>,
    diagnostics: DiagnosticBag,
    parents: OnceLock<ParentMap>,
}

impl SymbolTree {
    pub fn new(
        program: ProgramSymbol,
        arena: SymbolArena,
        tables: SymbolTables,
        interner: StringInterner,
        native_references: MultiMap<NativeOpcode, ExpressionId>,
        diagnostics: DiagnosticBag,
    ) -> Self {
        Self {
            program,
            arena,
            tables,
            interner,
            native_references,
            diagnostics,
            parents: OnceLock::new(),
        }
    }

    pub fn program(&self) -> &ProgramSymbol {
        &self.program
    }

    pub fn arena(&self) -> &SymbolArena {
        &self.arena
    }

    pub fn tables(&self) -> &SymbolTables {
        &self.tables
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn line(&self, number: u32) -> Option<&LineSymbol> {
        self.program.line(number)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSymbol> {
        self.program.lines()
    }

    pub fn expression(&self, id: ExpressionId) -> &ExpressionSymbol {
        self.arena.expression(id)
    }

    pub fn statement(&self, id: StatementId) -> &StatementSymbol {
        self.arena.statement(id)
    }

    /// The statement bound on line `number`.
    pub fn statement_on_line(&self, number: u32) -> Option<&StatementSymbol> {
        let id = self.line(number)?.statement?;
        Some(self.arena.statement(id))
    }

    /// The label on line `number`.
    pub fn label_on_line(&self, number: u32) -> Option<&LabelSymbol> {
        self.line(number).and_then(|line| self.arena.line_label(line))
    }

    /// Registered labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &LabelSymbol> {
        self.tables.labels().map(|id| self.arena.label(id))
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableSymbol> {
        self.tables.variables().map(|id| self.arena.variable(id))
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.tables.functions().map(|id| self.arena.function(id))
    }

    pub fn label_named(&self, name: &str) -> Option<&LabelSymbol> {
        let id = self.tables.label(self.interner.get(name)?)?;
        Some(self.arena.label(id))
    }

    pub fn variable_named(&self, name: &str) -> Option<&VariableSymbol> {
        let id = self.tables.variable(self.interner.get(name)?)?;
        Some(self.arena.variable(id))
    }

    pub fn function_named(&self, name: &str) -> Option<&FunctionSymbol> {
        let id = self.tables.function(self.interner.get(name)?)?;
        Some(self.arena.function(id))
    }

    pub fn native_references(&self, opcode: NativeOpcode) -> &[ExpressionId] {
        self.native_references.get(&opcode).unwrap_or(&[])
    }

    /// Expressions referencing `symbol`.
    pub fn references(&self, symbol: SymbolRef) -> &[ExpressionId] {
        match symbol {
            SymbolRef::Label(id) => &self.arena.label(id).references,
            SymbolRef::Variable(id) => &self.arena.variable(id).references,
            SymbolRef::Parameter(id) => &self.arena.parameter(id).references,
            SymbolRef::Function(id) => &self.arena.function(id).references,
            SymbolRef::Native(opcode) => self.native_references(opcode),
        }
    }

    pub fn reference_count(&self, symbol: SymbolRef) -> usize {
        self.references(symbol).len()
    }

    fn parents(&self) -> &ParentMap {
        get_or_publish(&self.parents, || ParentMap::build(&self.program, &self.arena))
    }

    /// The expression or statement owning `id`; `None` for function bodies
    /// of unbound declarations and for detached expressions.
    pub fn parent_of_expression(&self, id: ExpressionId) -> Option<SymbolParent> {
        self.parents().expressions.get(&id).copied()
    }

    /// The number of the line a statement was bound on.
    pub fn line_of_statement(&self, id: StatementId) -> Option<u32> {
        self.parents().statements.get(&id).copied()
    }

    /// The statement an expression ultimately belongs to.
    pub fn enclosing_statement(&self, id: ExpressionId) -> Option<StatementId> {
        let mut current = id;
        loop {
            match self.parent_of_expression(current)? {
                SymbolParent::Statement(statement) => return Some(statement),
                SymbolParent::Expression(parent) => current = parent,
            }
        }
    }
}
