//! Storage for every symbol of one binding, addressed by typed ids.

use crate::expression::ExpressionSymbol;
use crate::ids::*;
use crate::program::LineSymbol;
use crate::statement::StatementSymbol;
use crate::symbol::{FunctionSymbol, LabelSymbol, ParameterSymbol, VariableSymbol};
use reline_core::FxMap;
use reline_syntax::NodeId;

/// Typed symbol storage with a syntax node cache for expressions and
/// statements: binding the same node twice yields the same id.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    labels: Vec<LabelSymbol>,
    variables: Vec<VariableSymbol>,
    parameters: Vec<ParameterSymbol>,
    functions: Vec<FunctionSymbol>,
    expressions: Vec<ExpressionSymbol>,
    statements: Vec<StatementSymbol>,
    expression_cache: FxMap<NodeId, ExpressionId>,
    statement_cache: FxMap<NodeId, StatementId>,
}

macro_rules! storage {
    ($field:ident, $symbol:ty, $id:ident, $add:ident, $get:ident, $get_mut:ident) => {
        pub fn $add(&mut self, symbol: $symbol) -> $id {
            let id = $id::from_index(self.$field.len());
            self.$field.push(symbol);
            id
        }

        pub fn $get(&self, id: $id) -> &$symbol {
            &self.$field[id.index()]
        }

        pub fn $get_mut(&mut self, id: $id) -> &mut $symbol {
            &mut self.$field[id.index()]
        }

        pub fn $field(&self) -> impl Iterator<Item = ($id, &$symbol)> {
            self.$field
                .iter()
                .enumerate()
                .map(|(index, symbol)| ($id::from_index(index), symbol))
        }
    };
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    storage!(labels, LabelSymbol, LabelId, add_label, label, label_mut);
    storage!(variables, VariableSymbol, VariableId, add_variable, variable, variable_mut);
    storage!(parameters, ParameterSymbol, ParameterId, add_parameter, parameter, parameter_mut);
    storage!(functions, FunctionSymbol, FunctionId, add_function, function, function_mut);

    /// Store an expression, caching it under its syntax node.
    pub fn add_expression(&mut self, symbol: ExpressionSymbol) -> ExpressionId {
        let id = ExpressionId::from_index(self.expressions.len());
        if let Some(syntax) = symbol.syntax {
            self.expression_cache.insert(syntax, id);
        }
        self.expressions.push(symbol);
        id
    }

    pub fn expression(&self, id: ExpressionId) -> &ExpressionSymbol {
        &self.expressions[id.index()]
    }

    pub fn expressions(&self) -> impl Iterator<Item = (ExpressionId, &ExpressionSymbol)> {
        self.expressions
            .iter()
            .enumerate()
            .map(|(index, symbol)| (ExpressionId::from_index(index), symbol))
    }

    /// The expression already bound from `syntax`.
    pub fn cached_expression(&self, syntax: NodeId) -> Option<ExpressionId> {
        self.expression_cache.get(&syntax).copied()
    }

    pub fn add_statement(&mut self, symbol: StatementSymbol) -> StatementId {
        let id = StatementId::from_index(self.statements.len());
        if let Some(syntax) = symbol.syntax {
            self.statement_cache.insert(syntax, id);
        }
        self.statements.push(symbol);
        id
    }

    pub fn statement(&self, id: StatementId) -> &StatementSymbol {
        &self.statements[id.index()]
    }

    pub fn statements(&self) -> impl Iterator<Item = (StatementId, &StatementSymbol)> {
        self.statements
            .iter()
            .enumerate()
            .map(|(index, symbol)| (StatementId::from_index(index), symbol))
    }

    pub fn cached_statement(&self, syntax: NodeId) -> Option<StatementId> {
        self.statement_cache.get(&syntax).copied()
    }

    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// The label owned by `line`, if any.
    pub fn line_label(&self, line: &LineSymbol) -> Option<&LabelSymbol> {
        line.label.map(|id| self.label(id))
    }
}
