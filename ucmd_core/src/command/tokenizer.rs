use heapless::String;

use crate::error::{CmdError, CmdResult};
use crate::numeric::find_char;

/// Separates the command name and the argument tokens.
pub const TOKEN_SEPARATOR: char = ' ';

/// Copies the token at the start of `input` into `out`.
///
/// The token runs up to (not including) the first [`TOKEN_SEPARATOR`] or the
/// end of `input`. Returns `true` ("done") when no separator followed, i.e.
/// there are no further tokens. The caller positions the next call at
/// `out.len() + 1` bytes further.
///
/// Fails with `InvalidSize` if the token does not fit in `out`; `out` is
/// left empty in that case.
pub fn next_token<const M: usize>(input: &str, out: &mut String<M>) -> CmdResult<bool> {
    out.clear();
    let (token, done) = match find_char(input, TOKEN_SEPARATOR) {
        Some(end) => (&input[..end], false),
        None => (input, true),
    };
    out.push_str(token).map_err(|_| CmdError::InvalidSize)?;
    Ok(done)
}
