extern crate proc_macro;

mod tablegen;

use proc_macro::TokenStream;
use tablegen::define_command_table_impl;

#[proc_macro]
pub fn define_command_table(input: TokenStream) -> TokenStream {
    define_command_table_impl(input)
}
