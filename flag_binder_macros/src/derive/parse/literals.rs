//! Literal parsing helpers for `#[flag(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a literal from an attribute using `extractor`, reporting `expected`
/// when the literal has the wrong type.
fn parse_lit<T, F>(meta: &ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be {expected}")))
}

/// Parses a string literal such as `name = "address"`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "a string literal", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a character literal such as `short = 'a'`.
pub(crate) fn lit_char(meta: &ParseNestedMeta, key: &str) -> syn::Result<char> {
    parse_lit(meta, key, "a character literal", |lit| match lit {
        Lit::Char(c) => Some(c.value()),
        _ => None,
    })
}
