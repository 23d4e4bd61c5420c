use crate::codec::Scalar;
use crate::command::table::{ArgType, ArgumentDescriptor, CommandDescriptor, CommandHandler};
use crate::config::{CMD_ARG_BYTES_MAX_SIZE, CMD_ARG_MAX_SIZE};
use crate::error::{CmdError, CmdResult};

/// A decoded argument value carrying its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgValue {
    U8(u8),
    U16(u16),
    U32(u32),
    I8(i8),
    I16(i16),
    I32(i32),
}

impl ArgValue {
    /// Writes the raw host-order bytes of the value to the front of `dest`.
    pub fn encode(self, dest: &mut [u8]) -> CmdResult {
        match self {
            ArgValue::U8(v) => v.encode(dest),
            ArgValue::U16(v) => v.encode(dest),
            ArgValue::U32(v) => v.encode(dest),
            ArgValue::I8(v) => v.encode(dest),
            ArgValue::I16(v) => v.encode(dest),
            ArgValue::I32(v) => v.encode(dest),
        }
    }

    /// Reads a value of type `kind` back from `src`; `None` for the kinds
    /// without a numeric value ([`ArgType::Str`], [`ArgType::None`]).
    pub fn decode(kind: ArgType, src: &[u8]) -> CmdResult<Option<Self>> {
        let value = match kind {
            ArgType::U8 => ArgValue::U8(u8::decode(src)?),
            ArgType::U16 => ArgValue::U16(u16::decode(src)?),
            ArgType::U32 => ArgValue::U32(u32::decode(src)?),
            ArgType::I8 => ArgValue::I8(i8::decode(src)?),
            ArgType::I16 => ArgValue::I16(i16::decode(src)?),
            ArgType::I32 => ArgValue::I32(i32::decode(src)?),
            ArgType::Str | ArgType::None => return Ok(None),
        };
        Ok(Some(value))
    }

    pub const fn kind(&self) -> ArgType {
        match self {
            ArgValue::U8(_) => ArgType::U8,
            ArgValue::U16(_) => ArgType::U16,
            ArgValue::U32(_) => ArgType::U32,
            ArgValue::I8(_) => ArgType::I8,
            ArgValue::I16(_) => ArgType::I16,
            ArgValue::I32(_) => ArgType::I32,
        }
    }
}

/// Runtime slot for one declared argument.
///
/// Starts zeroed and invalid; an argument absent from the line stays that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParsedArgument {
    desc: ArgumentDescriptor,
    data: [u8; CMD_ARG_BYTES_MAX_SIZE],
    valid: bool,
}

macro_rules! typed_accessor {
    ($($name:ident => $t:ty, $kind:ident;)*) => {
        $(
            #[doc = concat!("The value as `", stringify!($t), "`; `InvalidSize` if the slot is declared otherwise.")]
            pub fn $name(&self) -> CmdResult<Option<$t>> {
                self.read::<$t>(ArgType::$kind)
            }
        )*
    };
}

impl ParsedArgument {
    /// Slot bound to `desc`, zeroed and invalid.
    pub const fn new(desc: ArgumentDescriptor) -> Self {
        Self { desc, data: [0; CMD_ARG_BYTES_MAX_SIZE], valid: false }
    }

    /// Slot bound to `desc` holding `value`.
    pub(crate) fn decoded(desc: ArgumentDescriptor, value: ArgValue) -> CmdResult<Self> {
        let mut slot = Self::new(desc);
        value.encode(&mut slot.data)?;
        slot.valid = true;
        Ok(slot)
    }

    pub const fn descriptor(&self) -> &ArgumentDescriptor {
        &self.desc
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Raw slot bytes, host order, zero past the value's width.
    pub const fn raw(&self) -> &[u8; CMD_ARG_BYTES_MAX_SIZE] {
        &self.data
    }

    /// The typed value, `None` when the argument was not supplied.
    pub fn value(&self) -> Option<ArgValue> {
        if !self.valid {
            return None;
        }
        ArgValue::decode(self.desc.kind(), &self.data).ok().flatten()
    }

    typed_accessor! {
        as_u8  => u8,  U8;
        as_u16 => u16, U16;
        as_u32 => u32, U32;
        as_i8  => i8,  I8;
        as_i16 => i16, I16;
        as_i32 => i32, I32;
    }

    fn read<T: Scalar>(&self, kind: ArgType) -> CmdResult<Option<T>> {
        if self.desc.kind() != kind {
            return Err(CmdError::InvalidSize);
        }
        if !self.valid {
            return Ok(None);
        }
        T::decode(&self.data).map(Some)
    }
}

/// The argument slots of one command, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arguments {
    slots: [ParsedArgument; CMD_ARG_MAX_SIZE],
}

impl Arguments {
    /// Every slot unused.
    pub const EMPTY: Self = Self { slots: [ParsedArgument::new(ArgumentDescriptor::NONE); CMD_ARG_MAX_SIZE] };

    /// One zeroed slot per descriptor.
    pub fn from_descriptors(descs: &[ArgumentDescriptor; CMD_ARG_MAX_SIZE]) -> Self {
        Self { slots: descs.map(ParsedArgument::new) }
    }

    /// Slot at declaration index `index`.
    pub fn get(&self, index: usize) -> Option<&ParsedArgument> {
        self.slots.get(index)
    }

    /// Declared slot whose designator is `designator`.
    pub fn by_designator(&self, designator: char) -> Option<&ParsedArgument> {
        self.slots.iter().find(|s| matches_designator(s, designator))
    }

    pub(crate) fn by_designator_mut(&mut self, designator: char) -> Option<&mut ParsedArgument> {
        self.slots.iter_mut().find(|s| matches_designator(s, designator))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedArgument> {
        self.slots.iter()
    }

    /// Number of slots that received a value.
    pub fn valid_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_valid()).count()
    }
}

#[inline(always)]
fn matches_designator(slot: &ParsedArgument, designator: char) -> bool {
    !slot.desc.is_none() && slot.desc.designator() == designator
}

/// Everything needed for one handler invocation. Built per dispatch, dropped after.
#[derive(Clone, Copy)]
pub struct DispatchHandle<'h> {
    name: &'static str,
    handler: &'h dyn CommandHandler,
    args: Arguments,
}

impl<'h> DispatchHandle<'h> {
    /// Handle for `info` with all argument slots zeroed.
    pub fn new(info: &CommandDescriptor<'h>) -> Self {
        Self {
            name: info.name(),
            handler: info.handler(),
            args: Arguments::from_descriptors(info.args()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.args
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.args
    }

    /// Calls the bound handler and returns its result untouched.
    pub fn invoke(&self) -> CmdResult {
        self.handler.handle(&self.args)
    }
}

impl core::fmt::Debug for DispatchHandle<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::table::arg_list;

    fn slots() -> Arguments {
        Arguments::from_descriptors(&arg_list(&[
            ArgumentDescriptor::new(ArgType::U8, 'r'),
            ArgumentDescriptor::new(ArgType::I16, 'q'),
        ]))
    }

    #[test]
    fn fresh_slots_are_zero_and_invalid() {
        let args = slots();
        assert_eq!(args.valid_count(), 0);
        for slot in args.iter() {
            assert!(!slot.is_valid());
            assert_eq!(slot.raw(), &[0; CMD_ARG_BYTES_MAX_SIZE]);
            assert_eq!(slot.value(), None);
        }
        assert_eq!(args.get(0).and_then(|s| s.as_u8().ok()), Some(None));
    }

    #[test]
    fn unused_slots_never_match() {
        let args = slots();
        assert!(args.by_designator('\0').is_none());
        assert!(args.by_designator('x').is_none());
        assert_eq!(args.by_designator('q').map(|s| s.descriptor().kind()), Some(ArgType::I16));
    }

    #[test]
    fn typed_access_is_checked() {
        let desc = ArgumentDescriptor::new(ArgType::I16, 'q');
        let slot = ParsedArgument::decoded(desc, ArgValue::I16(-40)).unwrap();

        assert_eq!(slot.as_i16(), Ok(Some(-40)));
        assert_eq!(slot.value(), Some(ArgValue::I16(-40)));
        assert_eq!(slot.as_u16(), Err(CmdError::InvalidSize));
        assert_eq!(slot.as_i32(), Err(CmdError::InvalidSize));
        assert_eq!(slot.as_i8(), Err(CmdError::InvalidSize));
    }

    #[test]
    fn value_kind_matches_variant() {
        assert_eq!(ArgValue::U32(1).kind(), ArgType::U32);
        assert_eq!(ArgValue::I8(-1).kind(), ArgType::I8);
        assert_eq!(ArgValue::decode(ArgType::None, &[0; 4]), Ok(None));
        assert_eq!(ArgValue::decode(ArgType::Str, &[0; 4]), Ok(None));
    }

    #[test]
    fn empty_arguments_have_no_declared_slot() {
        assert_eq!(Arguments::from_descriptors(&arg_list(&[])), Arguments::EMPTY);
        assert!(Arguments::EMPTY.iter().all(|s| s.descriptor().is_none()));
    }
}
