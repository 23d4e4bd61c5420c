//! # Command Table Macro
//!
//! Generates a `const` command table for `ucmd_core` from a compact mapping.
//!
//! ## Macro Input Format
//! ```text
//! define_command_table! {
//!     const COMMANDS;
//!     "pwmfreq":  "rB qw fd" => handlers::pwmfreq;
//!     "ctrlmode": ""         => handlers::ctrlmode;
//! }
//! ```
//!
//! Each argument is a designator character followed by a type letter.
//! Whitespace between pairs is ignored.
//!
//! +------+------+   +------+------+   +------+------+
//! | Char | Type |   | Char | Type |   | Char | Type |
//! +------+------+   +------+------+   +------+------+
//! | B    | u8   |   | W    | u16  |   | D    | u32  |
//! | b    | i8   |   | w    | i16  |   | d    | i32  |
//! | s    | str  |   |      |      |   |      |      |
//! +------+------+   +------+------+   +------+------+
//!
//! `s` declares a string-tagged slot; any value supplied for it is rejected
//! at dispatch time.
//!
//! ## Generated items
//! - `pub const COMMANDS: [CommandDescriptor<'static>; N]`, entries in input order.
//! - `pub const COMMANDS_SPECS: [(&str, &str); N]`, name and descriptor string for help output.
//! - Compile-time checks of the table size and name lengths against `ucmd_core::config`.
//!
//! Handlers are paths to `fn(&Arguments) -> CmdResult` items. The table is a
//! `const` rather than a `static`: bind it to a local before registering it.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{parse::Parse, parse_macro_input, Ident, LitStr, Result, Token};

/// One `"name": "spec" => path;` line.
struct TableEntry {
    name: LitStr,
    spec: LitStr,
    path: syn::Path,
}

/// Parsed macro input: `const <ident>;` followed by the entries.
struct TableMacroInput {
    table_ident: Ident,
    entries: Vec<TableEntry>,
}

impl Parse for TableMacroInput {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        // Expect: `const <ident>;`
        input.parse::<Token![const]>()?;
        let table_ident: Ident = input.parse()?;
        input.parse::<Token![;]>()?;

        let mut entries = Vec::new();
        while !input.is_empty() {
            let name: LitStr = input.parse()?;
            input.parse::<Token![:]>()?;
            let spec: LitStr = input.parse()?;
            input.parse::<Token![=>]>()?;
            let path: syn::Path = input.parse()?;
            // Trailing `;` is optional on the last entry
            if !input.is_empty() {
                input.parse::<Token![;]>()?;
            }
            entries.push(TableEntry { name, spec, path });
        }

        if entries.is_empty() {
            return Err(syn::Error::new(table_ident.span(), "command table needs at least one entry"));
        }
        Ok(TableMacroInput { table_ident, entries })
    }
}

/// Argument type as named in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    Str,
}

impl ArgKind {
    fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'B' => Some(ArgKind::U8),
            'W' => Some(ArgKind::U16),
            'D' => Some(ArgKind::U32),
            'b' => Some(ArgKind::I8),
            'w' => Some(ArgKind::I16),
            'd' => Some(ArgKind::I32),
            's' => Some(ArgKind::Str),
            _ => None,
        }
    }

    fn variant(self) -> Ident {
        let name = match self {
            ArgKind::U8 => "U8",
            ArgKind::U16 => "U16",
            ArgKind::U32 => "U32",
            ArgKind::I8 => "I8",
            ArgKind::I16 => "I16",
            ArgKind::I32 => "I32",
            ArgKind::Str => "Str",
        };
        Ident::new(name, Span::call_site())
    }
}

/// Splits a descriptor string into `(designator, type)` pairs.
fn parse_spec(spec: &str) -> std::result::Result<Vec<(char, ArgKind)>, String> {
    let mut chars = spec.chars().filter(|c| !c.is_whitespace());
    let mut out: Vec<(char, ArgKind)> = Vec::new();

    while let Some(designator) = chars.next() {
        if !designator.is_ascii_graphic() {
            return Err(format!("designator '{}' must be a printable ASCII character", designator.escape_default()));
        }
        let Some(letter) = chars.next() else {
            return Err(format!("designator '{designator}' has no type letter"));
        };
        let Some(kind) = ArgKind::from_letter(letter) else {
            return Err(format!("unknown type letter '{letter}' for designator '{designator}'"));
        };
        if out.iter().any(|(d, _)| *d == designator) {
            return Err(format!("designator '{designator}' declared twice"));
        }
        out.push((designator, kind));
    }
    Ok(out)
}

/// Rejects names the tokenizer could never produce.
fn check_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("command name must not be empty".into());
    }
    if name.chars().any(|c| c.is_whitespace()) {
        return Err(format!("command name '{name}' must not contain whitespace"));
    }
    Ok(())
}

/// Generate the table constants from the mapping.
pub fn define_command_table_impl(input: TokenStream) -> TokenStream {
    let TableMacroInput { table_ident, entries } = parse_macro_input!(input as TableMacroInput);

    let mut seen: Vec<String> = Vec::new();
    let mut rows: Vec<TokenStream2> = Vec::new();
    let mut specs: Vec<TokenStream2> = Vec::new();
    let mut checks: Vec<TokenStream2> = Vec::new();

    for TableEntry { name, spec, path } in &entries {
        let name_str = name.value();
        if let Err(msg) = check_name(&name_str) {
            return syn::Error::new(name.span(), msg).to_compile_error().into();
        }
        if seen.contains(&name_str) {
            return syn::Error::new(name.span(), format!("command '{name_str}' defined twice"))
                .to_compile_error()
                .into();
        }
        seen.push(name_str);

        let args = match parse_spec(&spec.value()) {
            Ok(args) => args,
            Err(msg) => return syn::Error::new(spec.span(), msg).to_compile_error().into(),
        };

        let descs = args.iter().map(|(designator, kind)| {
            let variant = kind.variant();
            quote! {
                ::ucmd_core::ArgumentDescriptor::new(::ucmd_core::ArgType::#variant, #designator)
            }
        });

        rows.push(quote! {
            ::ucmd_core::CommandDescriptor::new(
                #name,
                &#path,
                ::ucmd_core::arg_list(&[ #( #descs ),* ]),
            )
        });
        specs.push(quote! { (#name, #spec) });
        checks.push(quote! {
            assert!(
                #name.len() <= ::ucmd_core::config::CMD_NAME_MAX_LEN,
                concat!("command name too long: ", #name)
            );
        });
    }

    let count = rows.len();
    let specs_ident = format_ident!("{}_SPECS", table_ident);

    let out = quote! {
        pub const #table_ident: [::ucmd_core::CommandDescriptor<'static>; #count] = [
            #( #rows ),*
        ];

        /// Command names and descriptor strings, in table order.
        pub const #specs_ident: [(&'static str, &'static str); #count] = [
            #( #specs ),*
        ];

        const _: () = {
            assert!(
                #count <= ::ucmd_core::config::CMD_TABLE_MAX_SIZE,
                "too many commands for one table"
            );
            #( #checks )*
        };
    };

    out.into()
}
