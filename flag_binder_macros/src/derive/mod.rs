//! Expansion pipeline for `#[derive(FlagSource)]`.
//!
//! Parsing gathers the struct and field attributes, validation rejects
//! malformed flag names before any code is emitted, and generation renders
//! the trait implementation.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;
mod validate;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    validate::validate_fields(&parsed.fields)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::generate_impl(input, &parsed.fields, &krate))
}
