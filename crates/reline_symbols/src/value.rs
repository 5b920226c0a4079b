//! Values produced by constant evaluation.

use std::fmt;
use thiserror::Error;

/// An inclusive range of line numbers. `end` may be one less than `start`
/// for an empty range; anything shorter is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValue {
    start: i32,
    end: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the range {start}..{end} has negative length")]
pub struct RangeError {
    pub start: i32,
    pub end: i32,
}

impl RangeValue {
    pub fn new(start: i32, end: i32) -> Result<Self, RangeError> {
        if i64::from(end) < i64::from(start) - 1 {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }

    /// `end - start + 1`, never negative.
    pub fn length(&self) -> u32 {
        (i64::from(self.end) - i64::from(self.start) + 1) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn contains(&self, line: i32) -> bool {
        self.start <= line && line <= self.end
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The value of a constant expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Number(i32),
    String(String),
    Range(RangeValue),
}

impl LiteralValue {
    pub fn as_number(&self) -> Option<i32> {
        match self {
            LiteralValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<RangeValue> {
        match self {
            LiteralValue::Range(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::String(s) => write!(f, "\"{}\"", s),
            LiteralValue::Range(r) => write!(f, "{}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_length() {
        let range = RangeValue::new(3, 7).unwrap();
        assert_eq!(range.length(), 5);
        assert!(range.contains(3));
        assert!(range.contains(7));
        assert!(!range.contains(8));
    }

    #[test]
    fn test_empty_range_is_allowed() {
        let range = RangeValue::new(4, 3).unwrap();
        assert_eq!(range.length(), 0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_negative_length_is_rejected() {
        assert_eq!(RangeValue::new(4, 2), Err(RangeError { start: 4, end: 2 }));
        assert!(RangeValue::new(i32::MIN, i32::MAX).is_ok());
        assert!(RangeValue::new(i32::MAX, i32::MIN).is_err());
    }

    #[test]
    fn test_equal_ranges_compare_equal() {
        assert_eq!(RangeValue::new(1, 2), RangeValue::new(1, 2));
        assert_ne!(RangeValue::new(1, 2), RangeValue::new(1, 3));
        assert_eq!(LiteralValue::Range(RangeValue::new(1, 1).unwrap()).to_string(), "1..1");
    }
}
