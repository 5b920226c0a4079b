//! Serializable summaries of a compilation.

use reline_core::text::{LineMap, TextSpan};
use reline_diagnostics::{Diagnostic, DiagnosticLevel};
use serde::Serialize;

use crate::{Compilation, CompilerOptions};

/// Where a diagnostic points. `line` and `column` are 1-based; the column
/// counts bytes from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    fn new(span: TextSpan, line_map: &LineMap) -> Self {
        let position = line_map.line_and_column_of(span.start);
        Self {
            start: span.start,
            end: span.end(),
            line: position.line + 1,
            column: position.character + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedDiagnostic {
    pub code: &'static str,
    pub level: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl ReportedDiagnostic {
    pub fn new(diagnostic: &Diagnostic, line_map: &LineMap) -> Self {
        Self {
            code: diagnostic.code,
            level: diagnostic.level.as_str(),
            message: diagnostic.message.clone(),
            location: diagnostic.span.map(|span| SourceLocation::new(span, line_map)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error.as_str()
    }
}

/// The result of a compilation as the command line presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileReport {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
    pub error_count: usize,
    pub warning_count: usize,
    pub diagnostics: Vec<ReportedDiagnostic>,
}

impl CompileReport {
    pub fn new(compilation: &Compilation<'_>, source: &str, options: &CompilerOptions) -> Self {
        let line_map = LineMap::new(source);
        let diagnostics: Vec<_> = compilation
            .diagnostics()
            .into_iter()
            .map(|diagnostic| {
                if options.warnings_as_errors {
                    diagnostic.promote_warning()
                } else {
                    diagnostic
                }
            })
            .collect();
        let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count();

        Self {
            succeeded: error_count == 0,
            line_count: compilation.line_count(),
            error_count,
            warning_count,
            diagnostics: diagnostics
                .iter()
                .map(|diagnostic| ReportedDiagnostic::new(diagnostic, &line_map))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
