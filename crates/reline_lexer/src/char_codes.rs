//! Character classification used by the lexer.

use unicode_xid::UnicodeXID;

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const DOUBLE_QUOTE: char = '"';
pub const AT: char = '@';
pub const UNDERSCORE: char = '_';

/// Whether `ch` can start an identifier or keyword.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == AT || ch.is_xid_start()
}

/// Whether `ch` can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == AT || ch == UNDERSCORE || ch.is_xid_continue()
}

/// Whitespace that does not end a line. A lone carriage return counts.
#[inline]
pub fn is_inline_whitespace(ch: char) -> bool {
    ch != LINE_FEED && ch.is_whitespace()
}

#[inline]
pub fn ascii_digit_value(ch: char) -> Option<i32> {
    ch.to_digit(10).filter(|_| ch.is_ascii_digit()).map(|d| d as i32)
}
