//! reline_core: Core utilities for the Reline front end.
//!
//! Provides text spans, string interning, arena allocation, ordered
//! collections and compute-once publishing used throughout the pipeline.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod publish;
pub mod text;

// Re-export commonly used types
pub use arena::CompilerArena;
pub use collections::{FxMap, MultiMap, OrderedMap};
pub use intern::{InternedString, StringInterner};
pub use publish::get_or_publish;
pub use text::{LineMap, TextSpan};
