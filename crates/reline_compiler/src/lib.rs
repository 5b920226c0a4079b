//! reline_compiler: The Reline compile pipeline.
//!
//! Composes the stages: lex, parse, then bind. Each stage is usable on its
//! own from its crate; this crate runs them in order, merges their
//! diagnostics and turns the outcome into a serializable [`CompileReport`].

mod error;
mod options;
mod report;

pub use error::CompilerError;
pub use options::{CompilerOptions, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_MS};
pub use report::{CompileReport, ReportedDiagnostic, SourceLocation};

use std::path::Path;

use reline_core::arena::CompilerArena;
use reline_diagnostics::{Diagnostic, DiagnosticBag};
use reline_lexer::LexResult;
use reline_symbols::SymbolTree;
use reline_syntax::SyntaxTree;
use tracing::{debug, instrument};

/// The outcome of compiling one source text.
///
/// When lexing reports errors the token stream is not parsed, and only the
/// lexer diagnostics are present.
pub struct Compilation<'a> {
    lexer_diagnostics: DiagnosticBag,
    syntax: Option<SyntaxTree<'a>>,
    symbols: Option<SymbolTree>,
}

impl<'a> Compilation<'a> {
    pub fn syntax(&self) -> Option<&SyntaxTree<'a>> {
        self.syntax.as_ref()
    }

    pub fn symbols(&self) -> Option<&SymbolTree> {
        self.symbols.as_ref()
    }

    /// Number of program lines, known once the source was parsed.
    pub fn line_count(&self) -> Option<u32> {
        self.symbols.as_ref().map(|symbols| symbols.program().line_count())
    }

    /// Every diagnostic of every stage that ran, in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut merged = self.lexer_diagnostics.clone();
        if let Some(syntax) = &self.syntax {
            merged.extend(syntax.diagnostics().iter().cloned());
        }
        if let Some(symbols) = &self.symbols {
            merged.extend(symbols.diagnostics().iter().cloned());
        }
        merged.sort();
        merged.into_vec()
    }

    pub fn has_errors(&self) -> bool {
        self.lexer_diagnostics.has_errors()
            || self.syntax.as_ref().is_some_and(|syntax| syntax.has_errors())
            || self.symbols.as_ref().is_some_and(|symbols| symbols.has_errors())
    }

    /// A compilation succeeds when no stage reported an error.
    pub fn succeeded(&self) -> bool {
        !self.has_errors()
    }
}

/// Run the full pipeline on `source`, allocating the syntax tree in `arena`.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn compile<'a>(
    arena: &'a CompilerArena,
    source: &str,
) -> Result<Compilation<'a>, CompilerError> {
    let LexResult { tokens, diagnostics } = reline_lexer::lex(source);
    if diagnostics.has_errors() {
        debug!(errors = diagnostics.error_count(), "lexing failed, parse skipped");
        return Ok(Compilation {
            lexer_diagnostics: diagnostics,
            syntax: None,
            symbols: None,
        });
    }

    let syntax = reline_parser::parse(arena, tokens)?;
    let symbols = reline_binder::bind(&syntax)?;
    debug!(
        lines = syntax.lines().len(),
        syntax_diagnostics = syntax.diagnostics().len(),
        bind_diagnostics = symbols.diagnostics().len(),
        "compiled"
    );
    Ok(Compilation {
        lexer_diagnostics: diagnostics,
        syntax: Some(syntax),
        symbols: Some(symbols),
    })
}

/// Compile `source` with `options` and summarize the result.
pub fn compile_source(
    source: &str,
    options: &CompilerOptions,
) -> Result<CompileReport, CompilerError> {
    let arena = CompilerArena::for_source_len(source.len());
    let compilation = compile(&arena, source)?;
    Ok(CompileReport::new(&compilation, source, options))
}

/// Read a source or configuration file, validating it as UTF-8.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, CompilerError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CompilerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = simdutf8::basic::from_utf8(&bytes).map_err(|_| CompilerError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(text.to_owned())
}
