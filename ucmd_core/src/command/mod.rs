//! Command table, argument model and dispatcher.
//!
//! A command line is `<name> <token> <token> ...`, each token being one
//! designator character followed by a decimal literal (`r10`, `q-40`).
//! Tokens are routed to argument slots by designator, not by position.

mod args;
mod decoder;
mod dispatcher;
mod table;
mod tokenizer;

pub use args::{ArgValue, Arguments, DispatchHandle, ParsedArgument};
pub use decoder::decode_argument;
pub use dispatcher::{Dispatch, Dispatcher};
pub use table::{arg_list, ArgType, ArgumentDescriptor, CommandDescriptor, CommandHandler, CommandTable};
pub use tokenizer::{next_token, TOKEN_SEPARATOR};
