//! Identifiable symbols and the declaration tables that name them.

use crate::ids::{ExpressionId, FunctionId, LabelId, ParameterId, VariableId};
use crate::native::{NativeFunctionSymbol, NativeOpcode};
use crate::value::RangeValue;
use reline_core::{InternedString, OrderedMap, TextSpan};
use reline_syntax::NodeId;

/// A symbol that can be named in source.
pub trait Identifiable {
    fn identifier(&self) -> &str;

    /// Human-readable kind, as used in diagnostics.
    fn kind_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSymbol {
    pub identifier: String,
    pub name: InternedString,
    pub syntax: NodeId,
    pub span: TextSpan,
    /// The number of the labelled line.
    pub line: u32,
    pub references: Vec<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    pub identifier: String,
    pub name: InternedString,
    /// The first assignment to the variable.
    pub syntax: NodeId,
    pub span: TextSpan,
    pub references: Vec<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub identifier: String,
    pub name: InternedString,
    pub function: FunctionId,
    /// Position in the parameter list.
    pub index: usize,
    pub span: TextSpan,
    pub references: Vec<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub identifier: String,
    pub name: InternedString,
    pub syntax: NodeId,
    pub span: TextSpan,
    pub body: Option<ExpressionId>,
    /// Known when the body is a constant range.
    pub range: Option<RangeValue>,
    /// Bound only when `range` is known.
    pub parameters: Vec<ParameterId>,
    /// Number of declared parameters.
    pub arity: usize,
    pub references: Vec<ExpressionId>,
}

impl FunctionSymbol {
    pub fn contains_line(&self, line: u32) -> bool {
        match (self.range, i32::try_from(line)) {
            (Some(range), Ok(line)) => range.contains(line),
            _ => false,
        }
    }
}

macro_rules! impl_identifiable {
    ($ty:ty, $kind:literal) => {
        impl Identifiable for $ty {
            fn identifier(&self) -> &str {
                &self.identifier
            }

            fn kind_name(&self) -> &'static str {
                $kind
            }
        }
    };
}

impl_identifiable!(LabelSymbol, "label");
impl_identifiable!(VariableSymbol, "variable");
impl_identifiable!(ParameterSymbol, "parameter");
impl_identifiable!(FunctionSymbol, "function");

impl Identifiable for NativeFunctionSymbol {
    fn identifier(&self) -> &str {
        self.identifier
    }

    fn kind_name(&self) -> &'static str {
        "native function"
    }
}

/// What a name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    Label(LabelId),
    Variable(VariableId),
    Parameter(ParameterId),
    Function(FunctionId),
    Native(NativeOpcode),
}

impl SymbolRef {
    pub fn kind_name(self) -> &'static str {
        match self {
            SymbolRef::Label(_) => "label",
            SymbolRef::Variable(_) => "variable",
            SymbolRef::Parameter(_) => "parameter",
            SymbolRef::Function(_) => "function",
            SymbolRef::Native(_) => "native function",
        }
    }

    pub fn is_function(self) -> bool {
        matches!(self, SymbolRef::Function(_) | SymbolRef::Native(_))
    }
}

/// Name tables for labels, variables and functions. The first declaration
/// of a name is registered; later ones are refused.
#[derive(Debug, Clone, Default)]
pub struct SymbolTables {
    labels: OrderedMap<InternedString, LabelId>,
    variables: OrderedMap<InternedString, VariableId>,
    functions: OrderedMap<InternedString, FunctionId>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the already registered label when `name` is taken.
    pub fn register_label(&mut self, name: InternedString, id: LabelId) -> Option<LabelId> {
        self.labels.insert_first(name, id).copied()
    }

    pub fn register_variable(
        &mut self,
        name: InternedString,
        id: VariableId,
    ) -> Option<VariableId> {
        self.variables.insert_first(name, id).copied()
    }

    pub fn register_function(
        &mut self,
        name: InternedString,
        id: FunctionId,
    ) -> Option<FunctionId> {
        self.functions.insert_first(name, id).copied()
    }

    pub fn label(&self, name: InternedString) -> Option<LabelId> {
        self.labels.get(&name).copied()
    }

    pub fn variable(&self, name: InternedString) -> Option<VariableId> {
        self.variables.get(&name).copied()
    }

    pub fn function(&self, name: InternedString) -> Option<FunctionId> {
        self.functions.get(&name).copied()
    }

    /// Registered labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = LabelId> + '_ {
        self.labels.values().copied()
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.variables.values().copied()
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionId> + '_ {
        self.functions.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reline_core::StringInterner;

    #[test]
    fn test_first_registration_wins() {
        let interner = StringInterner::new();
        let name = interner.intern("loop");
        let mut tables = SymbolTables::new();
        assert_eq!(tables.register_label(name, LabelId(0)), None);
        assert_eq!(tables.register_label(name, LabelId(1)), Some(LabelId(0)));
        assert_eq!(tables.label(name), Some(LabelId(0)));
        assert_eq!(tables.labels().collect::<Vec<_>>(), vec![LabelId(0)]);
    }

    #[test]
    fn test_tables_are_separate_namespaces() {
        let interner = StringInterner::new();
        let name = interner.intern("x");
        let mut tables = SymbolTables::new();
        tables.register_label(name, LabelId(0));
        assert_eq!(tables.register_variable(name, VariableId(0)), None);
        assert_eq!(tables.function(name), None);
    }

    #[test]
    fn test_function_contains_line() {
        let interner = StringInterner::new();
        let function = FunctionSymbol {
            identifier: "F".to_string(),
            name: interner.intern("F"),
            syntax: NodeId(0),
            span: TextSpan::default(),
            body: None,
            range: RangeValue::new(2, 4).ok(),
            parameters: Vec::new(),
            arity: 0,
            references: Vec::new(),
        };
        assert!(!function.contains_line(1));
        assert!(function.contains_line(2));
        assert!(function.contains_line(4));
        assert!(!function.contains_line(5));
        assert_eq!(function.kind_name(), "function");
    }
}
