use core::fmt;

/// Failure kinds returned across every boundary call.
///
/// Success is `Ok(..)`; the line assembler never returns one of these and
/// reports malformed input through its overflow flag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CmdError {

    /// A required reference was absent (no table, no entries).
    NullPointer,

    /// Zero-length or out-of-bound size: empty/oversized table, empty string,
    /// buffer too small for the value being copied.
    InvalidSize,

    /// Numeric literal malformed or its magnitude exceeds the target width.
    OutOfRange,

    /// Opaque failure reported by a command handler.
    Generic,
}

impl fmt::Display for CmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CmdError::NullPointer => "required reference is missing",
            CmdError::InvalidSize => "invalid size",
            CmdError::OutOfRange => "value malformed or out of range",
            CmdError::Generic => "command handler failed",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for CmdError {}

/// Result alias used throughout the crate.
pub type CmdResult<T = ()> = Result<T, CmdError>;
