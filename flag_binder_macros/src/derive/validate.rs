//! Compile-time checks on flag metadata.
//!
//! Long names and shorts are checked per struct. Collisions that only appear
//! once flattened records are combined are reported by the runtime binder.

use std::collections::HashSet;

use crate::derive::parse::ParsedField;

const RESERVED_SHORTS: &[char] = &['h', 'V'];
const RESERVED_LONGS: &[&str] = &["help", "version"];

fn long_validation_error(long: &str) -> Option<String> {
    if long.is_empty() {
        Some("invalid flag `name`: must be non-empty".to_owned())
    } else if let Some(prefix) = long.chars().next().filter(|c| matches!(c, '-' | '_')) {
        Some(format!("invalid flag `name` '{long}': must not start with '{prefix}'"))
    } else if !long.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Some(format!(
            "invalid flag `name` '{long}': must contain only ASCII alphanumeric characters or '-'"
        ))
    } else if RESERVED_LONGS.contains(&long) {
        Some(format!("reserved flag `name` '{long}' conflicts with clap's built-in flags"))
    } else {
        None
    }
}

fn short_validation_error(short: char) -> Option<String> {
    if !short.is_ascii_alphanumeric() {
        Some(format!("invalid flag `short` '{short}': must be ASCII alphanumeric"))
    } else if RESERVED_SHORTS.contains(&short) {
        Some(format!("reserved flag `short` '{short}' conflicts with clap's built-in flags"))
    } else {
        None
    }
}

/// Validates every field's metadata and rejects duplicates within the struct.
pub(crate) fn validate_fields(fields: &[ParsedField]) -> syn::Result<()> {
    let mut used_longs = HashSet::with_capacity(fields.len());
    let mut used_shorts = HashSet::new();

    for field in fields {
        let attrs = &field.attrs;
        if attrs.flatten {
            if attrs.has_flag_metadata() {
                return Err(syn::Error::new_spanned(
                    &field.ident,
                    "`flatten` cannot be combined with `name`, `short`, `describe`, or `default`",
                ));
            }
            continue;
        }
        let Some(name) = &attrs.name else {
            continue;
        };
        let long = name.value();
        if let Some(message) = long_validation_error(&long) {
            return Err(syn::Error::new(name.span(), message));
        }
        if !used_longs.insert(long.clone()) {
            return Err(syn::Error::new(
                name.span(),
                format!("duplicate flag `name` '{long}'"),
            ));
        }
        if let Some(short) = attrs.short {
            if let Some(message) = short_validation_error(short) {
                return Err(syn::Error::new_spanned(&field.ident, message));
            }
            if !used_shorts.insert(short) {
                return Err(syn::Error::new_spanned(
                    &field.ident,
                    format!("duplicate flag `short` '{short}'"),
                ));
            }
        }
    }
    Ok(())
}
