//! Compile-time sizing of every buffer in the crate.
//!
//! Nothing here is allocated at runtime; the const-generic parameters of
//! [`LineAssembler`](crate::line::LineAssembler) and
//! [`Dispatcher`](crate::command::Dispatcher) default to these values.

/// Capacity of the line buffer, terminator included.
pub const LINE_BUFF_SIZE: usize = 16;

/// Maximum number of commands in one registered table.
pub const CMD_TABLE_MAX_SIZE: usize = 8;

/// Argument slots per command.
pub const CMD_ARG_MAX_SIZE: usize = 4;

/// Storage for a command name, terminator included.
pub const CMD_NAME_MAX_SIZE: usize = 16;

/// Longest accepted command name.
pub const CMD_NAME_MAX_LEN: usize = CMD_NAME_MAX_SIZE - 1;

/// Bytes reserved per decoded argument (widest supported numeric type).
pub const CMD_ARG_BYTES_MAX_SIZE: usize = 4;

/// Storage for a raw command line, terminator included.
pub const CMD_RAW_STR_MAX_SIZE: usize = 128;

/// Longest accepted argument token (designator plus literal).
pub const CMD_TOKEN_MAX_LEN: usize = 16;
