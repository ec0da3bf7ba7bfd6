//! Procedural macros for `flag_binder`.
//!
//! The [`FlagSource`] derive turns `#[flag(...)]` field annotations into an
//! implementation of `flag_binder::FlagSource`. Each annotated field becomes a
//! `flag_binder::FlagSpec` paired with a reference to the field's storage, and
//! fields marked `#[flag(flatten)]` splice in the flags of a nested record.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flag_binder::FlagSource`.
///
/// Field attributes:
///
/// - `name = "long-name"` marks the field as flaggable. Fields without a name
///   are ignored.
/// - `short = 'x'` sets the one-letter alias.
/// - `describe = "..."` sets the help text.
/// - `default = "..."` sets the default literal, always written as a string.
/// - `flatten` includes the flags of a field whose type also implements
///   `FlagSource`.
///
/// Struct attribute `#[flag(crate = "path")]` points the generated code at a
/// renamed `flag_binder` dependency.
///
/// Fields typed `String`, `bool` or a primitive integer bind directly. Any
/// other declared type still compiles, but binding it fails at run time with
/// `BindError::UnsupportedType`.
#[proc_macro_derive(FlagSource, attributes(flag))]
pub fn derive_flag_source(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
