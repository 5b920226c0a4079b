//! The types of bound expressions.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolType {
    Number,
    String,
    Range,
    Pointer,
    /// Unknown until run time; compatible with everything.
    Any,
    /// The type of an expression that failed to bind.
    Error,
}

impl SymbolType {
    pub fn name(self) -> &'static str {
        match self {
            SymbolType::Number => "number",
            SymbolType::String => "string",
            SymbolType::Range => "range",
            SymbolType::Pointer => "pointer",
            SymbolType::Any => "any",
            SymbolType::Error => "error",
        }
    }

    /// Whether a value of this type can be used where `expected` is
    /// required. `error` is accepted everywhere so one mistake is reported
    /// once.
    pub fn is_assignable_to(self, expected: SymbolType) -> bool {
        self == expected
            || expected == SymbolType::Any
            || self == SymbolType::Any
            || self == SymbolType::Error
    }

    /// Whether this type can name lines: a number, a range, or anything.
    pub fn is_line_reference(self) -> bool {
        matches!(
            self,
            SymbolType::Number | SymbolType::Range | SymbolType::Any | SymbolType::Error
        )
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignability() {
        assert!(SymbolType::Number.is_assignable_to(SymbolType::Number));
        assert!(SymbolType::Any.is_assignable_to(SymbolType::Range));
        assert!(SymbolType::String.is_assignable_to(SymbolType::Any));
        assert!(SymbolType::Error.is_assignable_to(SymbolType::Range));
        assert!(!SymbolType::Number.is_assignable_to(SymbolType::Range));
        assert!(!SymbolType::Pointer.is_assignable_to(SymbolType::Number));
    }

    #[test]
    fn test_line_references() {
        assert!(SymbolType::Range.is_line_reference());
        assert!(!SymbolType::String.is_line_reference());
        assert!(!SymbolType::Pointer.is_line_reference());
        assert_eq!(SymbolType::Pointer.to_string(), "pointer");
    }
}
