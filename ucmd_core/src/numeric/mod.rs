//! Decimal literal parsing and single-character search.
//!
//! Grammar: an optional leading `-` (signed parser only) followed by one or
//! more ASCII digits. An empty input is a size error; anything else that does
//! not match, or overflows 32 bits, is a range error.

use crate::error::{CmdError, CmdResult};

/// Parses a decimal literal into a `u32`.
pub fn parse_unsigned(text: &str) -> CmdResult<u32> {
    if text.is_empty() {
        return Err(CmdError::InvalidSize);
    }
    accumulate(text.as_bytes())
}

/// Parses an optionally negative decimal literal into an `i32`.
///
/// `i32::MIN` is accepted and `"-0"` yields `0`.
pub fn parse_signed(text: &str) -> CmdResult<i32> {
    if text.is_empty() {
        return Err(CmdError::InvalidSize);
    }
    let (negative, digits) = match text.as_bytes() {
        [b'-', rest @ ..] => (true, rest),
        all => (false, all),
    };
    let magnitude = i64::from(accumulate(digits)?);
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| CmdError::OutOfRange)
}

/// Folds ASCII digits into a `u32`, rejecting empty input, stray characters and overflow.
fn accumulate(digits: &[u8]) -> CmdResult<u32> {
    if digits.is_empty() {
        return Err(CmdError::OutOfRange);
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return Err(CmdError::OutOfRange);
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or(CmdError::OutOfRange)
    })
}

/// Byte index of the first `ch` in `text`, or `None` when absent.
pub fn find_char(text: &str, ch: char) -> Option<usize> {
    text.char_indices().find(|&(_, c)| c == ch).map(|(idx, _)| idx)
}
