//! Compute-once publishing for lazily built auxiliary structures.
//!
//! Several structures (the syntax index, the symbol parent map) are only
//! needed by some callers. They are built on first use and published into a
//! `OnceLock`. Two racing callers may both build the value; only the first
//! `set` wins and every later read observes that published value.

use std::sync::OnceLock;

/// Return the value in `cell`, building and publishing it first if needed.
pub fn get_or_publish<T, F>(cell: &OnceLock<T>, build: F) -> &T
where
    F: FnOnce() -> T,
{
    if let Some(value) = cell.get() {
        return value;
    }
    let value = build();
    // A concurrent caller may have published first; its value is kept.
    let _ = cell.set(value);
    match cell.get() {
        Some(value) => value,
        None => unreachable!("OnceLock is populated after set"),
    }
}
