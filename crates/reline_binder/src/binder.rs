//! The binder implementation.
//!
//! The declaration pass fills the program's line table, the label,
//! variable and function tables, and each function's range and
//! parameters. The full pass binds statements and expressions line by
//! line, resolving names against those tables.

use crate::error::BindError;
use crate::flags::BindingFlags;
use reline_core::{FxMap, InternedString, MultiMap, StringInterner, TextSpan};
use reline_diagnostics::{messages, DiagnosticBag, DiagnosticDescription};
use reline_evaluator::{EvaluationError, Evaluator};
use reline_symbols::*;
use reline_syntax::*;
use tracing::{debug, trace};

/// The output of the declaration pass, consumed by the full pass.
#[derive(Debug)]
pub struct DeclaredSymbols {
    program: ProgramSymbol,
    arena: SymbolArena,
    tables: SymbolTables,
    interner: StringInterner,
    native_references: MultiMap<NativeOpcode, ExpressionId>,
    diagnostics: DiagnosticBag,
    line_numbers: FxMap<NodeId, u32>,
    declarations: FxMap<NodeId, FunctionId>,
}

impl DeclaredSymbols {
    pub fn program(&self) -> &ProgramSymbol {
        &self.program
    }

    pub fn arena(&self) -> &SymbolArena {
        &self.arena
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Registered functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.tables.functions().map(|id| self.arena.function(id))
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelSymbol> {
        self.tables.labels().map(|id| self.arena.label(id))
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableSymbol> {
        self.tables.variables().map(|id| self.arena.variable(id))
    }

    /// The number of the line node `line`.
    pub fn line_number(&self, line: NodeId) -> Option<u32> {
        self.line_numbers.get(&line).copied()
    }
}

/// An expression's bound meaning before it is stored.
struct Bound {
    kind: ExpressionKind,
    ty: SymbolType,
    constant: bool,
}

impl Bound {
    fn new(kind: ExpressionKind, ty: SymbolType, constant: bool) -> Self {
        Self { kind, ty, constant }
    }

    fn bad() -> Self {
        Self::new(ExpressionKind::Bad, SymbolType::Error, false)
    }
}

/// Binds one syntax tree.
pub struct Binder<'t, 'a> {
    tree: &'t SyntaxTree<'a>,
    program: ProgramSymbol,
    arena: SymbolArena,
    tables: SymbolTables,
    interner: StringInterner,
    native_references: MultiMap<NativeOpcode, ExpressionId>,
    diagnostics: DiagnosticBag,
    /// Line node → line number.
    line_numbers: FxMap<NodeId, u32>,
    /// Function declaration statement → its function symbol.
    declarations: FxMap<NodeId, FunctionId>,
    evaluator: Evaluator,
    flags: BindingFlags,
    current_line: u32,
}

impl<'t, 'a> Binder<'t, 'a> {
    pub fn new(tree: &'t SyntaxTree<'a>) -> Self {
        let root = tree.root();
        let line_count = tree.lines().len() as u32;
        Self {
            tree,
            program: ProgramSymbol::new(root.id, root.span(), line_count),
            arena: SymbolArena::new(),
            tables: SymbolTables::new(),
            interner: StringInterner::new(),
            native_references: MultiMap::new(),
            diagnostics: DiagnosticBag::new(),
            line_numbers: FxMap::default(),
            declarations: FxMap::default(),
            evaluator: Evaluator::new(line_count),
            flags: BindingFlags::NONE,
            current_line: 1,
        }
    }

    /// Resume from the declarations made for the same tree.
    pub fn from_declared(
        tree: &'t SyntaxTree<'a>,
        declared: DeclaredSymbols,
    ) -> Result<Self, BindError> {
        let found = tree.lines().len() as u32;
        let declared_lines = declared.program.line_count();
        if declared_lines != found || !declared.program.is_complete() {
            return Err(BindError::DeclarationMismatch {
                declared: declared_lines,
                found,
            });
        }
        Ok(Self {
            tree,
            program: declared.program,
            arena: declared.arena,
            tables: declared.tables,
            interner: declared.interner,
            native_references: declared.native_references,
            diagnostics: declared.diagnostics,
            line_numbers: declared.line_numbers,
            declarations: declared.declarations,
            evaluator: Evaluator::new(found),
            flags: BindingFlags::NONE,
            current_line: 1,
        })
    }

    pub fn into_declared(self) -> DeclaredSymbols {
        DeclaredSymbols {
            program: self.program,
            arena: self.arena,
            tables: self.tables,
            interner: self.interner,
            native_references: self.native_references,
            diagnostics: self.diagnostics,
            line_numbers: self.line_numbers,
            declarations: self.declarations,
        }
    }

    pub fn finish(self) -> SymbolTree {
        SymbolTree::new(
            self.program,
            self.arena,
            self.tables,
            self.interner,
            self.native_references,
            self.diagnostics,
        )
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    fn report(&mut self, span: TextSpan, description: &DiagnosticDescription, args: &[&str]) {
        self.diagnostics.report(span, description, args);
    }

    // ========================================================================
    // Declaration pass
    // ========================================================================

    pub fn declare_program(&mut self) -> Result<(), BindError> {
        let lines = self.tree.lines();

        for (index, line) in lines.iter().enumerate() {
            let number = index as u32 + 1;
            self.line_numbers.insert(line.id, number);
            let label = line.label.map(|label| self.declare_label(number, label));
            self.program.set_line(LineSymbol {
                number,
                syntax: line.id,
                span: line.span(),
                label,
                statement: None,
            })?;
        }

        for line in lines {
            if let Some(Statement::Assignment(assignment)) = line.statement {
                self.declare_variable(assignment);
            }
        }

        for (index, line) in lines.iter().enumerate() {
            if let Some(Statement::FunctionDeclaration(declaration)) = line.statement {
                self.declare_function(index as u32 + 1, declaration)?;
            }
        }

        debug!(
            lines = lines.len(),
            labels = self.tables.labels().count(),
            variables = self.tables.variables().count(),
            functions = self.tables.functions().count(),
            "declaration pass complete"
        );
        Ok(())
    }

    fn declare_label(&mut self, number: u32, label: &Label) -> LabelId {
        let identifier = label.name();
        let name = self.interner.intern(identifier);
        let id = self.arena.add_label(LabelSymbol {
            identifier: identifier.to_string(),
            name,
            syntax: label.id,
            span: label.span(),
            line: number,
            references: Vec::new(),
        });
        if self.tables.register_label(name, id).is_some() {
            self.report(
                label.identifier.span,
                &messages::_0_IS_ALREADY_DECLARED_AS_A_1,
                &[identifier, "label"],
            );
        } else {
            trace!(label = identifier, line = number, "declared label");
        }
        id
    }

    /// Every assignment target is a variable; the first assignment declares it.
    fn declare_variable(&mut self, assignment: &AssignmentStatement<'_>) {
        let identifier = &assignment.identifier;
        if identifier.kind != SyntaxKind::Identifier || identifier.is_missing() {
            return;
        }
        let name = self.interner.intern(&identifier.text);
        if self.tables.variable(name).is_some() {
            return;
        }
        let id = self.arena.add_variable(VariableSymbol {
            identifier: identifier.text.clone(),
            name,
            syntax: assignment.id,
            span: identifier.span,
            references: Vec::new(),
        });
        self.tables.register_variable(name, id);
        trace!(variable = %identifier.text, "declared variable");
    }

    fn declare_function(
        &mut self,
        number: u32,
        declaration: &FunctionDeclarationStatement<'_>,
    ) -> Result<(), BindError> {
        self.current_line = number;
        let previous = std::mem::replace(&mut self.flags, BindingFlags::FUNCTION_RANGE);
        let body = self.bind_expression_at(declaration.body);
        self.flags = previous;
        let body = body?;
        let range = self.evaluate_range(body)?;

        let identifier = &declaration.identifier;
        let name = self.interner.intern(&identifier.text);
        let id = self.arena.add_function(FunctionSymbol {
            identifier: identifier.text.clone(),
            name,
            syntax: declaration.id,
            span: identifier.span,
            body: Some(body),
            range,
            parameters: Vec::new(),
            arity: declaration.parameters.map_or(0, |list| list.identifiers.len()),
            references: Vec::new(),
        });
        self.declarations.insert(declaration.id, id);

        if !identifier.is_missing() {
            if self.tables.register_function(name, id).is_some() {
                self.report(
                    identifier.span,
                    &messages::_0_IS_ALREADY_DECLARED_AS_A_1,
                    &[identifier.text.as_str(), "function"],
                );
            } else {
                trace!(function = %identifier.text, ?range, "declared function");
            }
        }

        if range.is_some() {
            if let Some(list) = declaration.parameters {
                self.declare_parameters(id, list);
                let function = self.arena.function_mut(id);
                function.arity = function.parameters.len();
            }
        }
        Ok(())
    }

    fn declare_parameters(&mut self, function: FunctionId, list: &ParameterList<'_>) {
        for token in list.identifiers {
            let name = self.interner.intern(&token.text);
            let duplicate = self
                .arena
                .function(function)
                .parameters
                .iter()
                .any(|&p| self.arena.parameter(p).name == name);
            if duplicate {
                self.report(
                    token.span,
                    &messages::_0_IS_ALREADY_DECLARED_AS_A_1,
                    &[token.text.as_str(), "parameter"],
                );
                continue;
            }
            let index = self.arena.function(function).parameters.len();
            let id = self.arena.add_parameter(ParameterSymbol {
                identifier: token.text.clone(),
                name,
                function,
                index,
                span: token.span,
                references: Vec::new(),
            });
            self.arena.function_mut(function).parameters.push(id);
        }
    }

    /// The range of a function body, when it is a constant range.
    fn evaluate_range(&mut self, body: ExpressionId) -> Result<Option<RangeValue>, BindError> {
        let symbol = self.arena.expression(body);
        if symbol.ty != SymbolType::Range || !symbol.is_constant {
            return Ok(None);
        }
        let span = symbol.span;
        match self.evaluator.evaluate(&self.arena, body) {
            Ok(LiteralValue::Range(range)) => Ok(Some(range)),
            Ok(_) => Ok(None),
            Err(EvaluationError::InvalidRange(error)) => {
                let (start, end) = (error.start.to_string(), error.end.to_string());
                self.report(
                    span,
                    &messages::INVALID_LINE_RANGE_0_1,
                    &[start.as_str(), end.as_str()],
                );
                Ok(None)
            }
            Err(EvaluationError::DivisionByZero) => {
                self.report(span, &messages::DIVISION_BY_ZERO, &[]);
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    // ========================================================================
    // Full pass
    // ========================================================================

    pub fn bind_program(&mut self) -> Result<(), BindError> {
        for (index, line) in self.tree.lines().iter().enumerate() {
            let number = index as u32 + 1;
            self.current_line = number;
            if let Some(statement) = line.statement {
                let id = self.bind_statement_at(statement)?;
                self.program.set_statement(number, id)?;
            }
        }
        debug!(
            expressions = self.arena.expression_count(),
            statements = self.arena.statement_count(),
            diagnostics = self.diagnostics.len(),
            "bind pass complete"
        );
        Ok(())
    }

    /// Bind an expression of this binder's tree. Returns the cached symbol
    /// when the node has been bound before.
    pub fn bind_expression(
        &mut self,
        expression: &Expression<'_>,
    ) -> Result<ExpressionId, BindError> {
        let line = self.line_of(expression.id())?;
        let previous = std::mem::replace(&mut self.current_line, line);
        let result = self.bind_expression_at(expression);
        self.current_line = previous;
        result
    }

    /// Bind a statement of this binder's tree.
    pub fn bind_statement(
        &mut self,
        statement: &Statement<'_>,
    ) -> Result<StatementId, BindError> {
        let line = self.line_of(statement.id())?;
        let previous = std::mem::replace(&mut self.current_line, line);
        let result = self.bind_statement_at(statement);
        self.current_line = previous;
        result
    }

    fn line_of(&self, node: NodeId) -> Result<u32, BindError> {
        self.tree
            .enclosing_line(node)
            .and_then(|line| self.line_numbers.get(&line.id).copied())
            .ok_or(BindError::NodeOutsideTree(node))
    }

    fn bind_statement_at(
        &mut self,
        statement: &Statement<'_>,
    ) -> Result<StatementId, BindError> {
        if let Some(id) = self.arena.cached_statement(statement.id()) {
            return Ok(id);
        }
        let kind = match statement {
            Statement::Expression(s) => {
                StatementKind::Expression(self.bind_expression_at(s.expression)?)
            }
            Statement::Assignment(s) => self.bind_assignment(s)?,
            Statement::Move(s) => StatementKind::Move(self.bind_manipulation(s)?),
            Statement::Swap(s) => StatementKind::Swap(self.bind_manipulation(s)?),
            Statement::Copy(s) => StatementKind::Copy(self.bind_manipulation(s)?),
            Statement::FunctionDeclaration(s) => self.bind_function_declaration(s)?,
            Statement::Return(s) => self.bind_return(s)?,
        };
        Ok(self.arena.add_statement(StatementSymbol {
            syntax: Some(statement.id()),
            span: statement.span(),
            line: self.current_line,
            kind,
        }))
    }

    fn bind_assignment(
        &mut self,
        statement: &AssignmentStatement<'_>,
    ) -> Result<StatementKind, BindError> {
        let value = self.bind_expression_at(statement.expression)?;
        let variable = self
            .interner
            .get(&statement.identifier.text)
            .and_then(|name| self.tables.variable(name));
        match variable {
            Some(variable) => Ok(StatementKind::Assignment { variable, value }),
            None if statement.identifier.is_missing() => Ok(StatementKind::Bad),
            None => Err(BindError::MissingDeclaration(statement.id)),
        }
    }

    fn bind_manipulation(
        &mut self,
        statement: &ManipulationStatement<'_>,
    ) -> Result<ManipulationOperands, BindError> {
        let source = self.bind_expression_at(statement.source)?;
        let target = self.bind_expression_at(statement.target)?;
        for operand in [source, target] {
            let symbol = self.arena.expression(operand);
            if !symbol.ty.is_line_reference() {
                let (span, found) = (symbol.span, symbol.ty.name());
                self.report(span, &messages::EXPECTED_TYPE_0_BUT_FOUND_1, &["range", found]);
            }
        }
        Ok(ManipulationOperands { source, target })
    }

    fn bind_function_declaration(
        &mut self,
        statement: &FunctionDeclarationStatement<'_>,
    ) -> Result<StatementKind, BindError> {
        let function = *self
            .declarations
            .get(&statement.id)
            .ok_or(BindError::MissingDeclaration(statement.id))?;
        if let Some(body) = self.arena.function(function).body {
            let body = self.arena.expression(body);
            if !body.ty.is_assignable_to(SymbolType::Range) {
                let (span, found) = (body.span, body.ty.name());
                self.report(span, &messages::EXPECTED_TYPE_0_BUT_FOUND_1, &["range", found]);
            }
        }
        Ok(StatementKind::FunctionDeclaration(function))
    }

    fn bind_return(
        &mut self,
        statement: &ReturnStatement<'_>,
    ) -> Result<StatementKind, BindError> {
        let value = self.bind_expression_at(statement.expression)?;
        let line = self.current_line;
        let function = self
            .tables
            .functions()
            .find(|&id| self.arena.function(id).contains_line(line));
        if function.is_none() {
            self.report(statement.keyword.span, &messages::RETURN_OUTSIDE_FUNCTION, &[]);
        }
        Ok(StatementKind::Return { function, value })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn bind_expression_at(
        &mut self,
        expression: &Expression<'_>,
    ) -> Result<ExpressionId, BindError> {
        if let Some(id) = self.arena.cached_expression(expression.id()) {
            return Ok(id);
        }
        let bound = match expression {
            Expression::Unary(e) => self.bind_unary(e)?,
            Expression::Binary(e) => self.bind_binary(e)?,
            Expression::Keyword(e) => {
                let keyword = LineKeyword::from_token_kind(e.keyword.kind)
                    .ok_or(BindError::UnknownOperator(e.keyword.kind))?;
                Bound::new(ExpressionKind::Keyword(keyword), SymbolType::Number, true)
            }
            Expression::Literal(e) => Self::bind_literal(&e.token)?,
            Expression::Grouping(e) => {
                let inner = self.bind_expression_at(e.expression)?;
                let symbol = self.arena.expression(inner);
                Bound::new(ExpressionKind::Grouping(inner), symbol.ty, symbol.is_constant)
            }
            Expression::Identifier(e) => self.bind_identifier(e),
            Expression::Invocation(e) => self.bind_invocation(e)?,
            Expression::FunctionPointer(e) => self.bind_function_pointer(e),
            Expression::LinePointer(e) => {
                let inner = self.bind_expression_at(e.expression)?;
                let symbol = self.arena.expression(inner);
                if symbol.ty.is_assignable_to(SymbolType::Number) {
                    let kind = ExpressionKind::LinePointer(inner);
                    Bound::new(kind, SymbolType::Range, symbol.is_constant)
                } else {
                    let (span, found) = (symbol.span, symbol.ty.name());
                    self.report(span, &messages::EXPECTED_TYPE_0_BUT_FOUND_1, &["number", found]);
                    Bound::bad()
                }
            }
        };
        let id = self.arena.add_expression(ExpressionSymbol {
            syntax: Some(expression.id()),
            span: expression.span(),
            line: self.current_line,
            ty: bound.ty,
            is_constant: bound.constant,
            kind: bound.kind,
        });
        self.record_reference(id);
        Ok(id)
    }

    fn bind_unary(&mut self, expression: &UnaryExpression<'_>) -> Result<Bound, BindError> {
        let operator = UnaryOperator::from_token_kind(expression.operator.kind)
            .ok_or(BindError::UnknownOperator(expression.operator.kind))?;
        let operand = self.bind_expression_at(expression.operand)?;
        let symbol = self.arena.expression(operand);
        if !symbol.ty.is_assignable_to(SymbolType::Number) {
            let found = symbol.ty.name();
            self.report(
                expression.operator.span,
                &messages::UNARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1,
                &[operator.text(), found],
            );
            return Ok(Bound::bad());
        }
        Ok(Bound::new(
            ExpressionKind::Unary { operator, operand },
            SymbolType::Number,
            symbol.is_constant,
        ))
    }

    fn bind_binary(&mut self, expression: &BinaryExpression<'_>) -> Result<Bound, BindError> {
        let operator = BinaryOperator::from_token_kind(expression.operator.kind)
            .ok_or(BindError::UnknownOperator(expression.operator.kind))?;
        let left = self.bind_expression_at(expression.left)?;
        let right = self.bind_expression_at(expression.right)?;
        let (l, r) = (self.arena.expression(left), self.arena.expression(right));
        let constant = l.is_constant && r.is_constant;
        match operator.result_type(l.ty, r.ty) {
            Some(ty) => Ok(Bound::new(
                ExpressionKind::Binary {
                    left,
                    operator,
                    right,
                },
                ty,
                constant,
            )),
            None => {
                let (lt, rt) = (l.ty.name(), r.ty.name());
                self.report(
                    expression.operator.span,
                    &messages::BINARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1_AND_2,
                    &[operator.text(), lt, rt],
                );
                Ok(Bound::bad())
            }
        }
    }

    fn bind_literal(token: &Token) -> Result<Bound, BindError> {
        let value = match (token.kind, &token.value) {
            (SyntaxKind::NumberLiteral, TokenValue::Integer(n)) => LiteralValue::Number(*n),
            (SyntaxKind::StringLiteral, TokenValue::String(s)) => LiteralValue::String(s.clone()),
            _ => return Err(BindError::MalformedLiteral(token.span)),
        };
        let ty = match value {
            LiteralValue::String(_) => SymbolType::String,
            _ => SymbolType::Number,
        };
        Ok(Bound::new(ExpressionKind::Literal(value), ty, true))
    }

    fn bind_identifier(&mut self, expression: &IdentifierExpression) -> Bound {
        // Invalid terms were reported by the parser.
        if expression.is_invalid() || expression.identifier.is_missing() {
            return Bound::bad();
        }
        let name = expression.name();
        let span = expression.identifier.span;
        let restricted = self.flags.contains(BindingFlags::NO_VARIABLES);
        match self.resolve(name) {
            Some(SymbolRef::Label(id)) => Bound::new(
                ExpressionKind::Label(id),
                SymbolType::Number,
                self.flags.contains(BindingFlags::LABELS_AS_CONSTANT),
            ),
            Some(SymbolRef::Parameter(_) | SymbolRef::Variable(_)) if restricted => {
                self.report(span, &messages::NON_CONSTANT_IN_FUNCTION_RANGE_0, &[name]);
                Bound::bad()
            }
            Some(SymbolRef::Parameter(id)) => {
                Bound::new(ExpressionKind::Parameter(id), SymbolType::Any, false)
            }
            Some(SymbolRef::Variable(id)) => {
                Bound::new(ExpressionKind::Variable(id), SymbolType::Any, false)
            }
            Some(SymbolRef::Function(_) | SymbolRef::Native(_)) => {
                if self.flags.contains(BindingFlags::NO_FUNCTIONS) {
                    self.report(span, &messages::FUNCTION_IN_FUNCTION_RANGE, &[]);
                } else {
                    self.report(span, &messages::FUNCTION_0_USED_AS_VALUE, &[name]);
                }
                Bound::bad()
            }
            None => {
                let kinds = if restricted {
                    "label"
                } else {
                    "label, parameter or variable"
                };
                self.report(span, &messages::NAME_0_IS_NOT_A_DECLARED_1, &[name, kinds]);
                Bound::bad()
            }
        }
    }

    fn bind_invocation(
        &mut self,
        expression: &InvocationExpression<'_>,
    ) -> Result<Bound, BindError> {
        let mut arguments = Vec::with_capacity(expression.arguments.len());
        for argument in expression.arguments {
            arguments.push(self.bind_expression_at(argument)?);
        }
        let name = expression.name();
        let span = expression.identifier.span;
        if self.flags.contains(BindingFlags::NO_FUNCTIONS) {
            self.report(span, &messages::FUNCTION_IN_FUNCTION_RANGE, &[]);
            return Ok(Bound::bad());
        }
        let (function, arity, ty) = match self.resolve(name) {
            Some(SymbolRef::Native(opcode)) => {
                let native = NativeFunctionSymbol::get(opcode);
                (FunctionRef::Native(opcode), Some(native.arity), native.result)
            }
            Some(SymbolRef::Function(id)) => {
                let function = self.arena.function(id);
                let arity = function.range.map(|_| function.arity);
                (FunctionRef::User(id), arity, SymbolType::Any)
            }
            Some(other) => {
                self.report(
                    span,
                    &messages::_0_IS_A_1_AND_CANNOT_BE_2,
                    &[name, other.kind_name(), "invoked"],
                );
                return Ok(Bound::bad());
            }
            None => {
                self.report(span, &messages::NO_FUNCTION_NAMED_0, &[name]);
                return Ok(Bound::bad());
            }
        };
        if let Some(arity) = arity {
            if arity != arguments.len() {
                let (expected, given) = (arity.to_string(), arguments.len().to_string());
                self.report(
                    span,
                    &messages::FUNCTION_0_EXPECTS_1_ARGUMENTS_BUT_GOT_2,
                    &[name, expected.as_str(), given.as_str()],
                );
            }
        }
        let kind = ExpressionKind::Invocation {
            function,
            arguments,
        };
        Ok(Bound::new(kind, ty, false))
    }

    fn bind_function_pointer(&mut self, expression: &FunctionPointerExpression) -> Bound {
        let identifier = &expression.identifier;
        if identifier.is_missing() {
            return Bound::bad();
        }
        let name = identifier.text.as_str();
        if self.flags.contains(BindingFlags::NO_FUNCTIONS) {
            self.report(identifier.span, &messages::FUNCTION_IN_FUNCTION_RANGE, &[]);
            return Bound::bad();
        }
        let function = match self.resolve(name) {
            Some(SymbolRef::Native(opcode)) => FunctionRef::Native(opcode),
            Some(SymbolRef::Function(id)) => FunctionRef::User(id),
            Some(other) => {
                self.report(
                    identifier.span,
                    &messages::_0_IS_A_1_AND_CANNOT_BE_2,
                    &[name, other.kind_name(), "pointed to"],
                );
                return Bound::bad();
            }
            None => {
                self.report(identifier.span, &messages::NO_FUNCTION_NAMED_0, &[name]);
                return Bound::bad();
            }
        };
        Bound::new(ExpressionKind::FunctionPointer(function), SymbolType::Pointer, false)
    }

    // ========================================================================
    // Name resolution
    // ========================================================================

    /// Label, parameter in scope, variable, native function, user function.
    fn resolve(&self, name: &str) -> Option<SymbolRef> {
        let key = self.interner.get(name);
        if let Some(key) = key {
            if let Some(id) = self.tables.label(key) {
                return Some(SymbolRef::Label(id));
            }
            if let Some(id) = self.parameter_in_scope(key) {
                return Some(SymbolRef::Parameter(id));
            }
            if let Some(id) = self.tables.variable(key) {
                return Some(SymbolRef::Variable(id));
            }
        }
        if let Some(native) = NativeFunctionSymbol::lookup(name) {
            return Some(SymbolRef::Native(native.opcode));
        }
        key.and_then(|key| self.tables.function(key))
            .map(SymbolRef::Function)
    }

    /// A parameter of the innermost function whose range contains the
    /// current line.
    fn parameter_in_scope(&self, name: InternedString) -> Option<ParameterId> {
        let line = self.current_line;
        let innermost = self
            .tables
            .functions()
            .map(|id| self.arena.function(id))
            .filter(|function| function.contains_line(line))
            .min_by_key(|function| function.range.map_or(u32::MAX, |range| range.length()))?;
        innermost
            .parameters
            .iter()
            .copied()
            .find(|&id| self.arena.parameter(id).name == name)
    }

    fn record_reference(&mut self, id: ExpressionId) {
        let target = match &self.arena.expression(id).kind {
            ExpressionKind::Label(label) => SymbolRef::Label(*label),
            ExpressionKind::Variable(variable) => SymbolRef::Variable(*variable),
            ExpressionKind::Parameter(parameter) => SymbolRef::Parameter(*parameter),
            ExpressionKind::Invocation { function, .. }
            | ExpressionKind::FunctionPointer(function) => match function {
                FunctionRef::User(function) => SymbolRef::Function(*function),
                FunctionRef::Native(opcode) => SymbolRef::Native(*opcode),
            },
            _ => return,
        };
        let references = match target {
            SymbolRef::Label(label) => &mut self.arena.label_mut(label).references,
            SymbolRef::Variable(variable) => &mut self.arena.variable_mut(variable).references,
            SymbolRef::Parameter(parameter) => &mut self.arena.parameter_mut(parameter).references,
            SymbolRef::Function(function) => &mut self.arena.function_mut(function).references,
            SymbolRef::Native(opcode) => {
                self.native_references.insert(opcode, id);
                return;
            }
        };
        references.push(id);
    }
}
