//! Compiler integration tests.
//!
//! End-to-end tests for the compile pipeline: lex -> parse -> bind.

use proptest::prelude::*;
use reline_compiler::{
    compile, compile_source, load_source, CompileReport, CompilerError, CompilerOptions,
};
use reline_core::arena::CompilerArena;
use std::path::PathBuf;

/// Helper: compile with default options and return the diagnostic codes.
fn codes(source: &str) -> Vec<&'static str> {
    report(source).diagnostics.iter().map(|d| d.code).collect()
}

fn report(source: &str) -> CompileReport {
    compile_source(source, &CompilerOptions::default()).expect("no internal error")
}

/// A scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reline-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Whole programs
// ============================================================================

#[test]
fn test_compile_empty_file() {
    let report = report("");
    assert!(report.succeeded);
    assert_eq!(report.line_count, Some(1));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_compile_countdown() {
    let source = "\
n = 3
loop: Write (n)
n = n - 1
swap loop with here
Write (\"done\")
";
    assert!(codes(source).is_empty());
    assert_eq!(report(source).line_count, Some(6));
}

#[test]
fn test_compile_functions_and_pointers() {
    let source = "\
function Twice here+1..here+2 (f)
x = f
return x
p = *Twice
Twice (p)
";
    assert!(codes(source).is_empty());
}

#[test]
fn test_crlf_line_endings() {
    let source = "x = 1\r\nWrite (y)\r\n";
    let report = report(source);
    assert_eq!(report.line_count, Some(3));
    let location = report.diagnostics[0].location.unwrap();
    assert_eq!((location.line, location.column), (2, 8));
}

#[test]
fn test_comments_and_labels_only() {
    assert!(codes("// nothing to do\nfirst:\nlast: // the end").is_empty());
}

#[test]
fn test_multiple_errors_are_all_reported() {
    assert_eq!(
        codes("Write (a)\nWrite (-\"s\")\nMax (1)\nreturn 0"),
        vec!["RL0008", "RL0014", "RL0017", "RL0012"]
    );
}

#[test]
fn test_syntax_tree_and_symbols_are_kept() {
    let arena = CompilerArena::new();
    let compilation = compile(&arena, "a: x = 1\nWrite (x)").unwrap();
    let syntax = compilation.syntax().expect("parsed");
    assert_eq!(syntax.lines().len(), 2);
    let symbols = compilation.symbols().expect("bound");
    assert_eq!(symbols.label_named("a").unwrap().line, 1);
    assert_eq!(symbols.variable_named("x").unwrap().references.len(), 1);
}

// ============================================================================
// Files and options
// ============================================================================

#[test]
fn test_options_file_controls_warnings() {
    let dir = scratch_dir("options");
    let config = dir.join(reline_compiler::CONFIG_FILE_NAME);
    std::fs::write(&config, r#"{ "warningsAsErrors": true }"#).unwrap();
    let source = dir.join("program.rl");
    std::fs::write(&source, "a: Write (1)\na: Write (2)\n").unwrap();

    let options = CompilerOptions::from_json_file(&config).unwrap();
    assert_eq!(options.timeout_ms, reline_compiler::DEFAULT_TIMEOUT_MS);
    let text = load_source(&source).unwrap();
    let report = compile_source(&text, &options).unwrap();
    assert!(!report.succeeded);
    assert_eq!(report.diagnostics[0].level, "error");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_options_file() {
    let dir = scratch_dir("bad-options");
    let config = dir.join("reline.json");
    std::fs::write(&config, "{ timeoutMs: 1 }").unwrap();
    let err = CompilerOptions::from_json_file(&config).unwrap_err();
    assert!(matches!(err, CompilerError::Config(_)));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_source_file() {
    let err = load_source("no/such/program.rl").unwrap_err();
    assert!(matches!(err, CompilerError::Io { .. }));
    assert_eq!(err.to_string(), "failed to read 'no/such/program.rl'");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_compile_never_fails_internally(source in "[a-z0-9 +*/%<.()\\[\\]:=\n-]{0,80}") {
        let result = compile_source(&source, &CompilerOptions::default());
        prop_assert!(result.is_ok(), "{:?}: {:?}", source, result.err());
    }

    #[test]
    fn prop_report_counts_match(source in "[a-z0-9 +()\n]{0,60}") {
        let report = compile_source(&source, &CompilerOptions::default()).unwrap();
        let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
        prop_assert_eq!(errors, report.error_count);
        prop_assert_eq!(report.succeeded, errors == 0);
    }
}
