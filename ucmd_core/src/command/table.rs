use core::fmt;

use crate::command::args::Arguments;
use crate::config::CMD_ARG_MAX_SIZE;
use crate::error::{CmdError, CmdResult};

/// Declared type of one argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgType {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    /// String tag. Declarable, but no literal decodes into it.
    Str,
    /// Unused slot.
    None,
}

impl ArgType {
    /// Width in bytes of a decoded value; zero for `None`.
    pub const fn width(self) -> usize {
        match self {
            ArgType::U8 | ArgType::I8 => 1,
            ArgType::U16 | ArgType::I16 => 2,
            ArgType::U32 | ArgType::I32 => 4,
            ArgType::Str | ArgType::None => 0,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, ArgType::I8 | ArgType::I16 | ArgType::I32)
    }
}

/// Type tag plus the designator character that selects the slot in a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArgumentDescriptor {
    kind: ArgType,
    designator: char,
}

impl ArgumentDescriptor {
    /// Filler for unused slots; never matches a token.
    pub const NONE: Self = Self { kind: ArgType::None, designator: '\0' };

    pub const fn new(kind: ArgType, designator: char) -> Self {
        Self { kind, designator }
    }

    pub const fn kind(&self) -> ArgType {
        self.kind
    }

    pub const fn designator(&self) -> char {
        self.designator
    }

    pub const fn is_none(&self) -> bool {
        matches!(self.kind, ArgType::None)
    }
}

/// Pads `list` with [`ArgumentDescriptor::NONE`] up to the slot count.
///
/// Meant for `const` tables, where passing more than `CMD_ARG_MAX_SIZE`
/// descriptors stops the build.
pub const fn arg_list(list: &[ArgumentDescriptor]) -> [ArgumentDescriptor; CMD_ARG_MAX_SIZE] {
    assert!(list.len() <= CMD_ARG_MAX_SIZE, "too many arguments for one command");
    let mut out = [ArgumentDescriptor::NONE; CMD_ARG_MAX_SIZE];
    let mut i = 0;
    while i < list.len() {
        out[i] = list[i];
        i += 1;
    }
    out
}

/// Code bound to a command name.
///
/// State the handler needs lives in the implementor itself; closures
/// `Fn(&Arguments) -> CmdResult` qualify through the blanket impl.
pub trait CommandHandler {
    /// Runs the command. The result is passed back to the caller of
    /// [`Dispatcher::run`](crate::command::Dispatcher::run) unchanged.
    fn handle(&self, args: &Arguments) -> CmdResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&Arguments) -> CmdResult,
{
    fn handle(&self, args: &Arguments) -> CmdResult {
        self(args)
    }
}

/// One row of a command table. Immutable once built.
#[derive(Clone, Copy)]
pub struct CommandDescriptor<'h> {
    name: &'static str,
    handler: &'h dyn CommandHandler,
    args: [ArgumentDescriptor; CMD_ARG_MAX_SIZE],
}

impl<'h> CommandDescriptor<'h> {
    pub const fn new(
        name: &'static str,
        handler: &'h dyn CommandHandler,
        args: [ArgumentDescriptor; CMD_ARG_MAX_SIZE],
    ) -> Self {
        Self { name, handler, args }
    }

    /// A command taking no arguments.
    pub const fn without_args(name: &'static str, handler: &'h dyn CommandHandler) -> Self {
        Self::new(name, handler, [ArgumentDescriptor::NONE; CMD_ARG_MAX_SIZE])
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn handler(&self) -> &'h dyn CommandHandler {
        self.handler
    }

    pub const fn args(&self) -> &[ArgumentDescriptor; CMD_ARG_MAX_SIZE] {
        &self.args
    }
}

impl fmt::Debug for CommandDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Borrowed view over caller-owned command descriptors.
///
/// The entries are never copied; they must outlive every dispatch.
#[derive(Debug, Clone, Copy)]
pub struct CommandTable<'t, 'h> {
    entries: &'t [CommandDescriptor<'h>],
}

impl<'t, 'h> CommandTable<'t, 'h> {
    /// Wraps `entries`, failing with `InvalidSize` when the slice is empty or
    /// holds more than `capacity` commands.
    pub fn new(entries: &'t [CommandDescriptor<'h>], capacity: usize) -> CmdResult<Self> {
        if entries.is_empty() || entries.len() > capacity {
            return Err(CmdError::InvalidSize);
        }
        Ok(Self { entries })
    }

    /// Linear, exact, case-sensitive lookup. The first matching entry wins.
    pub fn find(&self, name: &str) -> Option<&'t CommandDescriptor<'h>> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> &'t [CommandDescriptor<'h>] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Arguments) -> CmdResult {
        Ok(())
    }

    const PWMFREQ_ARGS: [ArgumentDescriptor; CMD_ARG_MAX_SIZE] = arg_list(&[
        ArgumentDescriptor::new(ArgType::U8, 'r'),
        ArgumentDescriptor::new(ArgType::I16, 'q'),
        ArgumentDescriptor::new(ArgType::I32, 'f'),
    ]);

    fn table() -> [CommandDescriptor<'static>; 3] {
        [
            CommandDescriptor::new("pwmfreq", &noop, PWMFREQ_ARGS),
            CommandDescriptor::new(
                "pid",
                &noop,
                arg_list(&[
                    ArgumentDescriptor::new(ArgType::I32, 'p'),
                    ArgumentDescriptor::new(ArgType::I32, 'i'),
                    ArgumentDescriptor::new(ArgType::I32, 'd'),
                ]),
            ),
            CommandDescriptor::without_args("ctrlmode", &noop),
        ]
    }

    #[test]
    fn arg_list_pads_with_none() {
        assert_eq!(PWMFREQ_ARGS[0].designator(), 'r');
        assert_eq!(PWMFREQ_ARGS[2].kind(), ArgType::I32);
        assert!(PWMFREQ_ARGS[3].is_none());
        assert!(arg_list(&[]).iter().all(ArgumentDescriptor::is_none));
    }

    #[test]
    fn widths_and_signedness() {
        assert_eq!(ArgType::U8.width(), 1);
        assert_eq!(ArgType::I16.width(), 2);
        assert_eq!(ArgType::U32.width(), 4);
        assert_eq!(ArgType::None.width(), 0);
        assert_eq!(ArgType::Str.width(), 0);
        assert!(!ArgType::Str.is_signed());
        assert!(ArgType::I8.is_signed());
        assert!(!ArgType::U32.is_signed());
    }

    #[test]
    fn table_size_is_checked() {
        let entries = table();
        assert_eq!(CommandTable::new(&entries[..0], 8).unwrap_err(), CmdError::InvalidSize);
        assert_eq!(CommandTable::new(&entries, 2).unwrap_err(), CmdError::InvalidSize);
        assert_eq!(CommandTable::new(&entries, 3).map(|t| t.len()), Ok(3));
    }

    #[test]
    fn lookup_by_exact_name() {
        let entries = table();
        let table = CommandTable::new(&entries, 8).unwrap();

        for (idx, name) in ["pwmfreq", "pid", "ctrlmode"].iter().enumerate() {
            let found = table.find(name).unwrap();
            assert!(core::ptr::eq(found, &entries[idx]));
        }
        assert!(table.find("dummy").is_none());
        assert!(table.find("PID").is_none());
        assert!(table.find("pwm").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let entries = [
            CommandDescriptor::without_args("led", &noop),
            CommandDescriptor::new("led", &noop, PWMFREQ_ARGS),
        ];
        let table = CommandTable::new(&entries, 8).unwrap();
        assert!(core::ptr::eq(table.find("led").unwrap(), &entries[0]));
    }
}
