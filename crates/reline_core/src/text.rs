//! Text spans and line maps for source location tracking.
//!
//! Tokens, syntax nodes and diagnostics all record where they came from as
//! byte offsets into the source text.

use std::fmt;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end())
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in bytes.
    pub character: u32,
}

/// A map from byte offsets to line numbers, built from source text.
///
/// Only `\n` starts a new line; a `\r\n` pair ends its line at the `\n`.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| (i + 1) as u32));
        Self { line_starts }
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and column for a byte offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert_eq!(span, TextSpan::from_bounds(5, 15));
        assert_eq!(span.to_string(), "(5, 15)");
        assert_eq!(format!("{:?}", TextSpan::empty(4)), "4..4");
    }

    #[test]
    fn test_text_span_union() {
        let a = TextSpan::new(2, 3);
        let b = TextSpan::from_bounds(7, 9);
        assert_eq!(a.union(&b), TextSpan::from_bounds(2, 9));
        assert_eq!(b.union(&a), TextSpan::from_bounds(2, 9));
    }

    #[test]
    fn test_line_map() {
        let text = "a = 1\r\nb = 2\nWrite (a)";
        let map = LineMap::new(text);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(6), 0);
        assert_eq!(map.line_of(7), 1);
        assert_eq!(map.line_of(13), 2);

        let lc = map.line_and_column_of(15);
        assert_eq!(lc.line, 2);
        assert_eq!(lc.character, 2);
    }
}
