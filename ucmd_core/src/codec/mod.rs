//! Fixed-width value <-> byte buffer copies.
//!
//! The buffer side always carries the capacity: a copy succeeds only when the
//! value being copied is non-empty and fits. Values are stored in host
//! (native-endian) representation.

use crate::error::{CmdError, CmdResult};

/// Copies `value` into the front of `dest`.
///
/// Fails with `InvalidSize` when `value` is empty or `dest` is smaller than it.
pub fn to_bytes(dest: &mut [u8], value: &[u8]) -> CmdResult {
    check_sizes(dest.len(), value.len())?;
    dest[..value.len()].copy_from_slice(value);
    Ok(())
}

/// Fills `value` from the first `value.len()` bytes of `src`.
///
/// Destination first, as in [`to_bytes`]. Fails with `InvalidSize` when
/// `value` is empty or `src` is smaller than it.
pub fn from_bytes(value: &mut [u8], src: &[u8]) -> CmdResult {
    check_sizes(src.len(), value.len())?;
    value.copy_from_slice(&src[..value.len()]);
    Ok(())
}

#[inline(always)]
fn check_sizes(capacity: usize, size: usize) -> CmdResult {
    if size == 0 || capacity < size {
        return Err(CmdError::InvalidSize);
    }
    Ok(())
}

/// A fixed-width value that can round-trip through a byte buffer.
pub trait Scalar: Copy + Sized {
    /// Width in bytes.
    const SIZE: usize;

    /// Writes the value's raw bytes to the front of `dest`.
    fn encode(self, dest: &mut [u8]) -> CmdResult;

    /// Reads a value back from the front of `src`.
    fn decode(src: &[u8]) -> CmdResult<Self>;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const SIZE: usize = core::mem::size_of::<$t>();

                #[inline(always)]
                fn encode(self, dest: &mut [u8]) -> CmdResult {
                    to_bytes(dest, &self.to_ne_bytes())
                }

                #[inline(always)]
                fn decode(src: &[u8]) -> CmdResult<Self> {
                    let mut raw = [0u8; core::mem::size_of::<$t>()];
                    from_bytes(&mut raw, src)?;
                    Ok(<$t>::from_ne_bytes(raw))
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, i8, i16, i32, f32);
