//! Fixture conformance tests.
//!
//! Every `.rl` file under `tests/fixtures` is compiled and its diagnostic
//! codes compared, in source order, against the codes listed on the file's
//! first line:
//!
//! ```text
//! // expect: RL0008 RL0012
//! ```
//!
//! `// expect: none` marks a fixture that must compile cleanly.

use reline_compiler::{compile_source, load_source, CompilerOptions};
use std::path::{Path, PathBuf};

const EXPECT_PREFIX: &str = "// expect:";

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Collect all `.rl` files in the fixtures directory, sorted by name.
fn collect_fixtures(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("fixtures directory exists")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "rl"))
        .collect();
    files.sort();
    files
}

/// Parse the expected codes from a fixture's header line.
fn expected_codes(source: &str) -> Result<Vec<String>, String> {
    let header = source.lines().next().unwrap_or_default();
    let codes = header
        .strip_prefix(EXPECT_PREFIX)
        .ok_or_else(|| format!("missing '{}' header", EXPECT_PREFIX))?
        .split_whitespace()
        .filter(|code| *code != "none")
        .map(str::to_string)
        .collect();
    Ok(codes)
}

/// Result of running one fixture.
#[derive(Debug)]
struct FixtureResult {
    file: PathBuf,
    expected: Vec<String>,
    actual: Vec<String>,
    error: Option<String>,
}

impl FixtureResult {
    fn passed(&self) -> bool {
        self.error.is_none() && self.expected == self.actual
    }
}

fn run_fixture(path: &Path) -> FixtureResult {
    let mut result = FixtureResult {
        file: path.to_path_buf(),
        expected: Vec::new(),
        actual: Vec::new(),
        error: None,
    };
    let source = match load_source(path) {
        Ok(source) => source,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    };
    match expected_codes(&source) {
        Ok(codes) => result.expected = codes,
        Err(e) => {
            result.error = Some(e);
            return result;
        }
    }
    match compile_source(&source, &CompilerOptions::default()) {
        Ok(report) => {
            result.actual = report.diagnostics.iter().map(|d| d.code.to_string()).collect();
        }
        Err(e) => result.error = Some(format!("internal compiler error: {}", e)),
    }
    result
}

#[test]
fn test_fixture_header_parsing() {
    assert_eq!(expected_codes("// expect: none\nWrite (1)"), Ok(vec![]));
    assert_eq!(
        expected_codes("// expect: RL0001 RL0002"),
        Ok(vec!["RL0001".to_string(), "RL0002".to_string()])
    );
    assert!(expected_codes("Write (1)").is_err());
}

#[test]
fn test_conformance_fixtures() {
    let fixtures = collect_fixtures(&fixtures_dir());
    assert!(!fixtures.is_empty(), "no fixtures found");

    let results: Vec<FixtureResult> = fixtures.iter().map(|path| run_fixture(path)).collect();
    let failures: Vec<&FixtureResult> = results.iter().filter(|r| !r.passed()).collect();

    println!("\n=== Fixture Conformance ===");
    println!("Total: {}", results.len());
    println!("Passed: {}", results.len() - failures.len());
    for failure in &failures {
        println!(
            "  FAIL {}: expected {:?}, got {:?}{}",
            failure.file.display(),
            failure.expected,
            failure.actual,
            failure
                .error
                .as_ref()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        );
    }
    assert!(failures.is_empty(), "{} fixture(s) failed", failures.len());
}
