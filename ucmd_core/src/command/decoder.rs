//! Typed decoding of a single `<designator><literal>` token.
//!
//! This is the only place signedness and width are enforced; the line
//! assembler and tokenizer pass bytes through untouched.

use crate::command::args::{ArgValue, ParsedArgument};
use crate::command::table::{ArgType, ArgumentDescriptor};
use crate::error::{CmdError, CmdResult};
use crate::numeric::{parse_signed, parse_unsigned};

/// Decodes the literal following the designator of `token` as `desc`'s type
/// and stores it, marked valid, in `slot`.
///
/// `slot` is only written on success. A `Str` or `None` descriptor fails with
/// `InvalidSize`; an empty, malformed or too-wide literal fails as the
/// numeric parser does, narrowing failures being `OutOfRange`.
pub fn decode_argument(token: &str, desc: &ArgumentDescriptor, slot: &mut ParsedArgument) -> CmdResult {
    let mut chars = token.chars();
    chars.next();
    let value = decode_literal(chars.as_str(), desc.kind())?;
    *slot = ParsedArgument::decoded(*desc, value)?;
    Ok(())
}

fn decode_literal(literal: &str, kind: ArgType) -> CmdResult<ArgValue> {
    match kind {
        ArgType::U8 => narrow(parse_unsigned(literal)?, ArgValue::U8),
        ArgType::U16 => narrow(parse_unsigned(literal)?, ArgValue::U16),
        ArgType::U32 => Ok(ArgValue::U32(parse_unsigned(literal)?)),
        ArgType::I8 => narrow(parse_signed(literal)?, ArgValue::I8),
        ArgType::I16 => narrow(parse_signed(literal)?, ArgValue::I16),
        ArgType::I32 => Ok(ArgValue::I32(parse_signed(literal)?)),
        ArgType::Str | ArgType::None => Err(CmdError::InvalidSize),
    }
}

#[inline(always)]
fn narrow<S, T, F>(value: S, wrap: F) -> CmdResult<ArgValue>
where
    T: TryFrom<S>,
    F: FnOnce(T) -> ArgValue,
{
    T::try_from(value).map(wrap).map_err(|_| CmdError::OutOfRange)
}
