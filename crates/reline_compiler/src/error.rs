//! Errors returned by the compile pipeline and option loading.

use std::path::PathBuf;

use reline_binder::BindError;
use reline_parser::ParseError;
use thiserror::Error;

/// Failures of the compile pipeline and its file-reading surface.
///
/// Problems in the compiled program itself are diagnostics, never a
/// `CompilerError`.
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
