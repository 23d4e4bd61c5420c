//! Heapless command-line handling for small targets.
//!
//! Two independent halves:
//! - [`line::LineAssembler`] turns a stream of received bytes into
//!   complete, NUL-terminated lines.
//! - [`command::Dispatcher`] matches a line against a registered command
//!   table, decodes the designator-tagged arguments and calls the handler.
//!
//! Both are plain values owned by the caller; nothing is global.

#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod line;
pub mod numeric;

pub use command::{
    arg_list, ArgType, ArgValue, ArgumentDescriptor, Arguments, CommandDescriptor, CommandHandler,
    CommandTable, Dispatch, DispatchHandle, Dispatcher, ParsedArgument,
};
pub use error::{CmdError, CmdResult};
pub use line::{CharSink, LineAssembler};
