//! Arena allocation for syntax trees.
//!
//! Syntax nodes are allocated from a bump arena owned by the caller of the
//! parser. When a compilation is done, the entire arena is freed at once.

use bumpalo::Bump;

/// The compiler arena wraps a bump allocator for all syntax allocations.
pub struct CompilerArena {
    bump: Bump,
}

impl CompilerArena {
    /// Create a new compiler arena with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena sized for a source text of the given length.
    ///
    /// Roughly one expression node per four source bytes is a good upper
    /// bound for line-oriented programs.
    pub fn for_source_len(len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(len.saturating_mul(16)),
        }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}

impl Default for CompilerArena {
    fn default() -> Self {
        Self::new()
    }
}
