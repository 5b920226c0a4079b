//! Graphical diagnostics using miette.
//!
//! Converts reported compiler diagnostics into miette reports with the
//! source line, an arrow under the offending span and the diagnostic code.

use std::fmt::Display;

use miette::{LabeledSpan, NamedSource, Severity, SourceSpan};
use reline_compiler::ReportedDiagnostic;

/// A compilation diagnostic with rich formatting.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CompileDiagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    pub src: NamedSource<String>,
    pub span: Option<SourceSpan>,
}

impl CompileDiagnostic {
    pub fn from_reported(diagnostic: &ReportedDiagnostic, source_path: &str, source: &str) -> Self {
        let severity = match diagnostic.level {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Advice,
        };
        Self {
            code: diagnostic.code,
            severity,
            message: diagnostic.message.clone(),
            src: NamedSource::new(source_path, source.to_string()),
            span: diagnostic.location.map(|location| {
                let start = location.start as usize;
                (start, (location.end - location.start) as usize).into()
            }),
        }
    }

    fn label(&self) -> &'static str {
        match self.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
            Severity::Advice => "here",
        }
    }
}

impl miette::Diagnostic for CompileDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(self.label().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;
    use reline_compiler::{compile_source, CompilerOptions};

    fn first_diagnostic(source: &str) -> CompileDiagnostic {
        let report = compile_source(source, &CompilerOptions::default()).unwrap();
        CompileDiagnostic::from_reported(&report.diagnostics[0], "test.rl", source)
    }

    #[test]
    fn test_error_diagnostic() {
        let diag = first_diagnostic("x = 1\nWrite (y)");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "The name 'y' is not a declared label, parameter or variable.");
        let span = diag.span.unwrap();
        assert_eq!((span.offset(), span.len()), (13, 1));
        assert_eq!(diag.code().unwrap().to_string(), "RL0008");
        assert_eq!(diag.labels().unwrap().count(), 1);
    }

    #[test]
    fn test_warning_diagnostic() {
        let diag = first_diagnostic("a: Write (1)\na: Write (2)");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.label(), "warning here");
    }

    #[test]
    fn test_unterminated_string_span_runs_to_end() {
        let diag = first_diagnostic("Write (\"abc");
        let span = diag.span.unwrap();
        assert_eq!((span.offset(), span.len()), (7, 4));
    }
}
