use heapless::String;

use crate::command::args::DispatchHandle;
use crate::command::decoder::decode_argument;
use crate::command::table::{CommandDescriptor, CommandTable};
use crate::command::tokenizer::{next_token, TOKEN_SEPARATOR};
use crate::config::{CMD_NAME_MAX_LEN, CMD_RAW_STR_MAX_SIZE, CMD_TABLE_MAX_SIZE, CMD_TOKEN_MAX_LEN};
use crate::error::{CmdError, CmdResult};
use crate::numeric::find_char;

/// Outcome of a [`Dispatcher::run`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// The handler ran and returned `Ok`.
    Executed,
    /// No command with that name is registered; nothing ran.
    NotFound,
}

/// Parses command lines against a registered table and invokes handlers.
///
/// An explicit, caller-owned context: several dispatchers may coexist, each
/// bound to its own table.
///
/// # Type Parameters
/// - `T`: Maximum number of entries accepted by [`register_table`](Self::register_table).
pub struct Dispatcher<'t, 'h, const T: usize = CMD_TABLE_MAX_SIZE> {
    table: Option<CommandTable<'t, 'h>>,
}

impl<'t, 'h, const T: usize> Dispatcher<'t, 'h, T> {
    /// A dispatcher with no table; every parse fails with `NullPointer` until one is registered.
    pub const fn new() -> Self {
        Self { table: None }
    }

    /// Binds `entries` as the command table. The entries are borrowed, not copied.
    ///
    /// - `None` fails with `NullPointer`.
    /// - An empty slice or more than `T` entries fails with `InvalidSize`.
    ///
    /// A failed call keeps the previously registered table.
    pub fn register_table(&mut self, entries: Option<&'t [CommandDescriptor<'h>]>) -> CmdResult {
        let Some(entries) = entries else {
            log_warn!("dispatcher: table rejected, no entries");
            return Err(CmdError::NullPointer);
        };
        match CommandTable::new(entries, T) {
            Ok(table) => {
                self.table = Some(table);
                log_debug!("dispatcher: table registered, {} commands", entries.len());
                Ok(())
            }
            Err(err) => {
                log_warn!("dispatcher: table rejected, {} entries", entries.len());
                Err(err)
            }
        }
    }

    /// The registered table, if any.
    pub fn table(&self) -> Option<&CommandTable<'t, 'h>> {
        self.table.as_ref()
    }

    /// Resolves `name` in the registered table.
    ///
    /// An unknown name is not an error: it yields `Ok(None)`.
    pub fn find_command(&self, name: &str) -> CmdResult<Option<&'t CommandDescriptor<'h>>> {
        let table = self.table.as_ref().ok_or(CmdError::NullPointer)?;
        Ok(table.find(name))
    }

    /// Turns `raw` into a ready-to-invoke handle without calling the handler.
    ///
    /// Each argument token is routed to the declared slot whose designator
    /// equals the token's first character, whatever the order of the tokens
    /// or of the declarations. Tokens matching no declared designator are
    /// ignored whatever their length; a repeated designator keeps the last value.
    ///
    /// Returns `Ok(None)` for an unknown command. Fails with `NullPointer`
    /// without a table, `InvalidSize` for an empty or oversized line, name or
    /// bound argument token, and with the decoder's error for a bad argument.
    pub fn parse(&self, raw: &str) -> CmdResult<Option<DispatchHandle<'h>>> {
        let table = self.table.as_ref().ok_or(CmdError::NullPointer)?;

        let raw = raw.trim_start_matches(TOKEN_SEPARATOR);
        if raw.is_empty() || raw.len() >= CMD_RAW_STR_MAX_SIZE {
            return Err(CmdError::InvalidSize);
        }

        let mut name = String::<CMD_NAME_MAX_LEN>::new();
        let mut done = next_token(raw, &mut name)?;

        let Some(info) = table.find(&name) else {
            log_debug!("dispatcher: unknown command '{}'", name.as_str());
            return Ok(None);
        };

        let mut handle = DispatchHandle::new(info);
        let mut token = String::<CMD_TOKEN_MAX_LEN>::new();
        let mut rest = &raw[name.len()..];

        while !done {
            // Step over the separator that ended the previous token.
            rest = &rest[TOKEN_SEPARATOR.len_utf8()..];
            let word = match find_char(rest, TOKEN_SEPARATOR) {
                Some(end) => &rest[..end],
                None => {
                    done = true;
                    rest
                }
            };
            rest = &rest[word.len()..];

            let Some(designator) = word.chars().next() else {
                continue;
            };
            let Some(slot) = handle.arguments_mut().by_designator_mut(designator) else {
                log_trace!("dispatcher: ignoring '{}'", word);
                continue;
            };

            // Only tokens bound to a declared slot are held to the token capacity.
            next_token(word, &mut token)?;
            let desc = *slot.descriptor();
            if let Err(err) = decode_argument(&token, &desc, slot) {
                log_warn!("dispatcher: bad argument '{}' for '{}'", word, info.name());
                return Err(err);
            }
        }

        log_debug!("dispatcher: resolved '{}'", info.name());
        Ok(Some(handle))
    }

    /// Parses `raw` and invokes the resolved handler.
    ///
    /// Parse failures abort before the handler runs. The handler's own error
    /// is returned unchanged.
    pub fn run(&self, raw: &str) -> CmdResult<Dispatch> {
        let Some(handle) = self.parse(raw)? else {
            return Ok(Dispatch::NotFound);
        };
        if let Err(err) = handle.invoke() {
            log_debug!("dispatcher: '{}' failed: {}", handle.name(), err);
            return Err(err);
        }
        Ok(Dispatch::Executed)
    }
}

impl<const T: usize> Default for Dispatcher<'_, '_, T> {
    fn default() -> Self {
        Self::new()
    }
}
