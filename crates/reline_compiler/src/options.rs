//! Compiler options, loaded from a `reline.json` file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;

/// The configuration file looked up next to a source file.
pub const CONFIG_FILE_NAME: &str = "reline.json";

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Options controlling a compilation. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// How long the command line waits for a compilation to finish.
    pub timeout_ms: u64,
    /// Report warnings as errors; a compilation with warnings then fails.
    pub warnings_as_errors: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            warnings_as_errors: false,
        }
    }
}

impl CompilerOptions {
    /// Parse options from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse an options file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CompilerError> {
        let content = crate::load_source(path)?;
        Ok(Self::from_json_str(&content)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
