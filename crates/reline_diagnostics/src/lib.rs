//! reline_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing problem found by the lexer, parser or binder is a
//! [`Diagnostic`] built from one of the static descriptions in [`messages`].
//! Diagnostics never stop a stage; they accumulate in a [`DiagnosticBag`]
//! that travels with the tree that produced them.

use reline_core::text::TextSpan;
use std::fmt;

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Hidden,
    Info,
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticLevel::Hidden => "hidden",
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message template with a code and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescription {
    /// The stable diagnostic code (e.g. `RL0001`).
    pub code: &'static str,
    pub level: DiagnosticLevel,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with resolved message text and an optional location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Option<TextSpan>,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(description: &DiagnosticDescription, args: &[&str]) -> Self {
        Self {
            code: description.code,
            level: description.level,
            message: format_message(description.message, args),
            span: None,
        }
    }

    /// Create a diagnostic attached to a span of source text.
    pub fn at(span: TextSpan, description: &DiagnosticDescription, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(description, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    /// Raise a warning to an error; other levels are returned unchanged.
    pub fn promote_warning(mut self) -> Self {
        if self.level == DiagnosticLevel::Warning {
            self.level = DiagnosticLevel::Error;
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.level, self.code, self.message)?;
        if let Some(span) = self.span {
            write!(f, " {}", span)?;
        }
        Ok(())
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An append-only collection of diagnostics.
///
/// Once an Error-level diagnostic has been added, [`has_errors`] stays true.
///
/// [`has_errors`]: DiagnosticBag::has_errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.has_errors |= diagnostic.is_error();
        self.diagnostics.push(diagnostic);
    }

    /// Report a diagnostic at a span.
    pub fn report(&mut self, span: TextSpan, description: &DiagnosticDescription, args: &[&str]) {
        self.add(Diagnostic::at(span, description, args));
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for diagnostic in diagnostics {
            self.add(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Sort by source position; diagnostics without a span come first.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by_key(|d| d.span.map(|s| (s.start, s.length)));
    }
}

impl<'b> IntoIterator for &'b DiagnosticBag {
    type Item = &'b Diagnostic;
    type IntoIter = std::slice::Iter<'b, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl FromIterator<Diagnostic> for DiagnosticBag {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        let mut bag = DiagnosticBag::new();
        bag.extend(iter);
        bag
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticDescription { code: $code, level: DiagnosticLevel::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticDescription { code: $code, level: DiagnosticLevel::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Lexer and parser (RL0001-RL0007)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticDescription = diag!("RL0001", Error, "Unexpected character '{0}'.");
    pub const INVALID_EXPRESSION_TERM_0: DiagnosticDescription = diag!("RL0002", Error, "Invalid expression term '{0}'.");
    pub const ONLY_INVOCATIONS_AS_STATEMENT: DiagnosticDescription = diag!("RL0003", Error, "Only function invocations can be used as a statement.");
    pub const EXPECTED_TYPE_0_BUT_FOUND_1: DiagnosticDescription = diag!("RL0004", Error, "Expected an expression of type '{0}' but found '{1}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticDescription = diag!("RL0005", Error, "Unterminated string literal.");
    pub const EXPECTED_END_OF_LINE_BUT_FOUND_0: DiagnosticDescription = diag!("RL0006", Error, "Expected the end of the line but found '{0}'.");
    pub const EXPECTED_0_BUT_FOUND_1: DiagnosticDescription = diag!("RL0007", Error, "Expected '{0}' but found '{1}'.");

    // ========================================================================
    // Binder (RL0008-RL0020)
    // ========================================================================
    pub const NAME_0_IS_NOT_A_DECLARED_1: DiagnosticDescription = diag!("RL0008", Error, "The name '{0}' is not a declared {1}.");
    pub const FUNCTION_0_USED_AS_VALUE: DiagnosticDescription = diag!("RL0009", Error, "'{0}' is a function; did you mean to invoke or point to it?");
    pub const NO_FUNCTION_NAMED_0: DiagnosticDescription = diag!("RL0010", Error, "No function named '{0}' has been declared.");
    pub const _0_IS_A_1_AND_CANNOT_BE_2: DiagnosticDescription = diag!("RL0011", Error, "'{0}' is a {1} and cannot be {2}.");
    pub const RETURN_OUTSIDE_FUNCTION: DiagnosticDescription = diag!("RL0012", Error, "Return statements can only appear inside a function's line range.");
    pub const BINARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1_AND_2: DiagnosticDescription = diag!("RL0013", Error, "Operator '{0}' cannot be applied to operands of type '{1}' and '{2}'.");
    pub const UNARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1: DiagnosticDescription = diag!("RL0014", Error, "Operator '{0}' cannot be applied to an operand of type '{1}'.");
    pub const NON_CONSTANT_IN_FUNCTION_RANGE_0: DiagnosticDescription = diag!("RL0015", Error, "Variables and parameters cannot be used in a function's line range; '{0}' is not constant.");
    pub const FUNCTION_IN_FUNCTION_RANGE: DiagnosticDescription = diag!("RL0016", Error, "Functions cannot be used in a function's line range.");
    pub const FUNCTION_0_EXPECTS_1_ARGUMENTS_BUT_GOT_2: DiagnosticDescription = diag!("RL0017", Error, "Function '{0}' expects {1} argument(s) but was given {2}.");
    pub const _0_IS_ALREADY_DECLARED_AS_A_1: DiagnosticDescription = diag!("RL0018", Warning, "'{0}' is already declared as a {1}; this declaration is ignored.");
    pub const INVALID_LINE_RANGE_0_1: DiagnosticDescription = diag!("RL0019", Error, "The line range {0}..{1} is invalid; its end precedes its start.");
    pub const DIVISION_BY_ZERO: DiagnosticDescription = diag!("RL0020", Error, "Division by zero in a constant expression.");

    /// Every description, in code order.
    pub const ALL: &[DiagnosticDescription] = &[
        UNEXPECTED_CHARACTER_0,
        INVALID_EXPRESSION_TERM_0,
        ONLY_INVOCATIONS_AS_STATEMENT,
        EXPECTED_TYPE_0_BUT_FOUND_1,
        UNTERMINATED_STRING_LITERAL,
        EXPECTED_END_OF_LINE_BUT_FOUND_0,
        EXPECTED_0_BUT_FOUND_1,
        NAME_0_IS_NOT_A_DECLARED_1,
        FUNCTION_0_USED_AS_VALUE,
        NO_FUNCTION_NAMED_0,
        _0_IS_A_1_AND_CANNOT_BE_2,
        RETURN_OUTSIDE_FUNCTION,
        BINARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1_AND_2,
        UNARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_1,
        NON_CONSTANT_IN_FUNCTION_RANGE_0,
        FUNCTION_IN_FUNCTION_RANGE,
        FUNCTION_0_EXPECTS_1_ARGUMENTS_BUT_GOT_2,
        _0_IS_ALREADY_DECLARED_AS_A_1,
        INVALID_LINE_RANGE_0_1,
        DIVISION_BY_ZERO,
    ];

    /// Look up a description by its code.
    pub fn by_code(code: &str) -> Option<&'static DiagnosticDescription> {
        ALL.iter().find(|d| d.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Expected '{0}' but found '{1}'.", &["to", "with"]);
        assert_eq!(msg, "Expected 'to' but found 'with'.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unterminated string literal.", &[]);
        assert_eq!(msg, "Unterminated string literal.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::at(TextSpan::new(0, 1), &messages::UNEXPECTED_CHARACTER_0, &["&"]);
        assert_eq!(diag.to_string(), "error RL0001: Unexpected character '&'. (0, 1)");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::RETURN_OUTSIDE_FUNCTION, &[]);
        assert!(diag.span.is_none());
        assert_eq!(diag.code, "RL0012");
        assert!(diag.is_error());
    }

    #[test]
    fn test_bag_has_errors_is_sticky() {
        let mut bag = DiagnosticBag::new();
        assert!(!bag.has_errors());
        bag.add(Diagnostic::new(&messages::_0_IS_ALREADY_DECLARED_AS_A_1, &["a", "label"]));
        assert!(!bag.has_errors());
        bag.add(Diagnostic::new(&messages::DIVISION_BY_ZERO, &[]));
        bag.add(Diagnostic::new(&messages::_0_IS_ALREADY_DECLARED_AS_A_1, &["b", "label"]));
        assert!(bag.has_errors());
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.len(), 3);
    }

    #[test]
    fn test_bag_sort() {
        let mut bag = DiagnosticBag::new();
        bag.report(TextSpan::new(10, 1), &messages::UNEXPECTED_CHARACTER_0, &["$"]);
        bag.report(TextSpan::new(5, 1), &messages::UNEXPECTED_CHARACTER_0, &["&"]);
        bag.sort();
        assert_eq!(bag.diagnostics()[0].span, Some(TextSpan::new(5, 1)));
    }

    #[test]
    fn test_promote_warning() {
        let warning = Diagnostic::new(&messages::_0_IS_ALREADY_DECLARED_AS_A_1, &["Foo", "function"]);
        assert!(warning.promote_warning().is_error());
    }

    #[test]
    fn test_codes_are_unique_and_ordered() {
        let codes: Vec<_> = messages::ALL.iter().map(|d| d.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
        assert_eq!(codes.len(), 20);
        assert_eq!(messages::by_code("RL0018").map(|d| d.level), Some(DiagnosticLevel::Warning));
    }
}
