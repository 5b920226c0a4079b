//! reline: The Reline command-line compiler.
//!
//! Usage:
//!   reline <FILE> [--timeout <ms>] [--config <path>] [--format human|json] [-v...]
//!
//! Compiles one source file and reports its diagnostics. The compilation
//! runs on a blocking task raced against a timer.

mod diagnostic;

use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser, ValueEnum};
use reline_compiler::{
    compile_source, load_source, CompileReport, CompilerError, CompilerOptions, CONFIG_FILE_NAME,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::diagnostic::CompileDiagnostic;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERRORS: i32 = 1;
const EXIT_TIMEOUT: i32 = 2;
const EXIT_INTERNAL: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "reline", about = "Compile a Reline program and report its diagnostics")]
struct Cli {
    /// The source file to compile.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Give up after this many milliseconds.
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Options file; defaults to a reline.json next to FILE when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Treat warnings as errors.
    #[arg(long)]
    warnings_as_errors: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// How a run ended.
#[derive(Debug)]
enum Outcome {
    Compiled(CompileReport),
    TimedOut(Duration),
    Failed(String),
}

impl Outcome {
    fn exit_code(&self) -> i32 {
        match self {
            Outcome::Compiled(report) if report.succeeded => EXIT_SUCCESS,
            Outcome::Compiled(_) => EXIT_ERRORS,
            Outcome::TimedOut(_) => EXIT_TIMEOUT,
            Outcome::Failed(_) => EXIT_INTERNAL,
        }
    }
}

/// The JSON rendering of an [`Outcome`].
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum JsonOutcome<'a> {
    Compiled(&'a CompileReport),
    Timeout {
        #[serde(rename = "timeoutMs")]
        timeout_ms: u64,
    },
    InternalError {
        message: &'a str,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let exit_code = run(&cli).await;
    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "reline_compiler=debug,reline_binder=debug,warn",
        _ => "reline_compiler=trace,reline_binder=trace,info",
    }
}

async fn run(cli: &Cli) -> i32 {
    let file = cli.file.display().to_string();
    let inputs = load_options(cli).and_then(|options| Ok((load_source(&cli.file)?, options)));
    let (source, options) = match inputs {
        Ok(inputs) => inputs,
        Err(error) => {
            let outcome = Outcome::Failed(error.to_string());
            render(cli.format, &file, "", &outcome);
            return outcome.exit_code();
        }
    };
    debug!(file = %file, ?options, "compiling");

    let start = Instant::now();
    let outcome = compile_with_timeout(source.clone(), options).await;
    debug!(elapsed = ?start.elapsed(), exit_code = outcome.exit_code(), "finished");
    render(cli.format, &file, &source, &outcome);
    outcome.exit_code()
}

/// Resolve options: the config file first, then command-line overrides.
fn load_options(cli: &Cli) -> Result<CompilerOptions, CompilerError> {
    let mut options = match &cli.config {
        Some(path) => CompilerOptions::from_json_file(path)?,
        None => {
            let sibling = cli
                .file
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(CONFIG_FILE_NAME);
            if sibling.is_file() {
                CompilerOptions::from_json_file(&sibling)?
            } else {
                CompilerOptions::default()
            }
        }
    };
    if let Some(timeout_ms) = cli.timeout {
        options.timeout_ms = timeout_ms;
    }
    if cli.warnings_as_errors {
        options.warnings_as_errors = true;
    }
    Ok(options)
}

async fn compile_with_timeout(source: String, options: CompilerOptions) -> Outcome {
    let timeout = options.timeout();
    let task = tokio::task::spawn_blocking(move || compile_source(&source, &options));
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(report))) => Outcome::Compiled(report),
        Ok(Ok(Err(error))) => Outcome::Failed(error.to_string()),
        Ok(Err(join_error)) => Outcome::Failed(format!("compilation task failed: {}", join_error)),
        Err(_) => Outcome::TimedOut(timeout),
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(format: OutputFormat, file: &str, source: &str, outcome: &Outcome) {
    match format {
        OutputFormat::Human => render_human(file, source, outcome),
        OutputFormat::Json => match serde_json::to_string_pretty(&json_outcome(outcome)) {
            Ok(json) => println!("{}", json),
            Err(error) => eprintln!("error: failed to serialize the report: {}", error),
        },
    }
}

fn json_outcome(outcome: &Outcome) -> JsonOutcome<'_> {
    match outcome {
        Outcome::Compiled(report) => JsonOutcome::Compiled(report),
        Outcome::TimedOut(timeout) => JsonOutcome::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        },
        Outcome::Failed(message) => JsonOutcome::InternalError { message },
    }
}

fn render_human(file: &str, source: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Compiled(report) => {
            for reported in &report.diagnostics {
                let diagnostic = CompileDiagnostic::from_reported(reported, file, source);
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            println!("{}", summary(report));
        }
        Outcome::TimedOut(timeout) => {
            eprintln!("error: compilation timed out after {} ms", timeout.as_millis());
        }
        Outcome::Failed(message) => {
            eprintln!("internal compiler error: {}", message);
        }
    }
}

fn summary(report: &CompileReport) -> String {
    if report.succeeded {
        let lines = report.line_count.unwrap_or(0);
        match report.warning_count {
            0 => format!("Compiled {} line(s) successfully.", lines),
            n => format!("Compiled {} line(s) with {} warning(s).", lines, n),
        }
    } else {
        format!(
            "Found {} error(s) and {} warning(s).",
            report.error_count, report.warning_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("reline").chain(args.iter().copied()))
    }

    fn report(source: &str) -> CompileReport {
        compile_source(source, &CompilerOptions::default()).unwrap()
    }

    #[test]
    fn test_arguments() {
        let cli = cli(&["program.rl", "--timeout", "100", "--format", "json", "-vv"]);
        assert_eq!(cli.file, PathBuf::from("program.rl"));
        assert_eq!(cli.timeout, Some(100));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = cli(&["missing/program.rl", "--timeout", "7", "--warnings-as-errors"]);
        let options = load_options(&cli).unwrap();
        assert_eq!(options.timeout_ms, 7);
        assert!(options.warnings_as_errors);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let cli = cli(&["program.rl", "--config", "missing/reline.json"]);
        assert!(matches!(load_options(&cli), Err(CompilerError::Io { .. })));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Compiled(report("Write (1)")).exit_code(), EXIT_SUCCESS);
        assert_eq!(Outcome::Compiled(report("Write (x)")).exit_code(), EXIT_ERRORS);
        assert_eq!(Outcome::TimedOut(Duration::from_secs(1)).exit_code(), EXIT_TIMEOUT);
        assert_eq!(Outcome::Failed(String::new()).exit_code(), EXIT_INTERNAL);
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&report("Write (1)")), "Compiled 1 line(s) successfully.");
        assert_eq!(
            summary(&report("a: Write (1)\na: Write (2)")),
            "Compiled 2 line(s) with 1 warning(s)."
        );
        assert_eq!(summary(&report("return 1")), "Found 1 error(s) and 0 warning(s).");
    }

    #[test]
    fn test_json_outcomes() {
        let timeout = serde_json::to_value(json_outcome(&Outcome::TimedOut(
            Duration::from_millis(250),
        )))
        .unwrap();
        assert_eq!(timeout["status"], "timeout");
        assert_eq!(timeout["timeoutMs"], 250);

        let compiled = Outcome::Compiled(report("return 1"));
        let value = serde_json::to_value(json_outcome(&compiled)).unwrap();
        assert_eq!(value["status"], "compiled");
        assert_eq!(value["succeeded"], false);
        assert_eq!(value["diagnostics"][0]["code"], "RL0012");

        let failed = Outcome::Failed("boom".to_string());
        let value = serde_json::to_value(json_outcome(&failed)).unwrap();
        assert_eq!(value["status"], "internalError");
        assert_eq!(value["message"], "boom");
    }

    #[tokio::test]
    async fn test_compile_with_timeout() {
        let options = CompilerOptions::default();
        let outcome = compile_with_timeout("Write (1)".to_string(), options).await;
        assert!(matches!(outcome, Outcome::Compiled(ref report) if report.succeeded));
    }

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(directive_for_verbosity(0), "warn");
        assert!(directive_for_verbosity(1).contains("reline_binder=debug"));
        assert!(directive_for_verbosity(5).contains("=trace"));
    }
}
