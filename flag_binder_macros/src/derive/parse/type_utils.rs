//! Type classification for flaggable fields.
//!
//! Classification is syntactic: only the final path segment of the declared
//! type is inspected, so `String` and `std::string::String` both bind as text
//! while a type alias of `String` does not.

use quote::ToTokens;
use syn::{PathArguments, Type};

/// Storage strategy chosen for a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueShape {
    Text,
    Switch,
    Integer,
    Unsupported,
}

const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
];

/// Strips invisible groups and parentheses left by macro expansion.
fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => peel(&group.elem),
        Type::Paren(paren) => peel(&paren.elem),
        other => other,
    }
}

pub(crate) fn classify(ty: &Type) -> ValueShape {
    let Type::Path(path) = peel(ty) else {
        return ValueShape::Unsupported;
    };
    if path.qself.is_some() {
        return ValueShape::Unsupported;
    }
    let Some(last) = path.path.segments.last() else {
        return ValueShape::Unsupported;
    };
    if !matches!(last.arguments, PathArguments::None) {
        return ValueShape::Unsupported;
    }
    let ident = last.ident.to_string();
    match ident.as_str() {
        "String" => ValueShape::Text,
        "bool" => ValueShape::Switch,
        name if INTEGER_TYPES.contains(&name) => ValueShape::Integer,
        _ => ValueShape::Unsupported,
    }
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Renders the declared type compactly for diagnostics, e.g. `Option<u8>`.
///
/// Spaces survive only between two words, as in `dyn Display`.
pub(crate) fn type_name(ty: &Type) -> String {
    let rendered = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(rendered.len());
    let mut chars = rendered.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            out.push(c);
            continue;
        }
        let after_word = out.chars().next_back().is_some_and(is_word_char);
        let before_word = chars.peek().copied().is_some_and(is_word_char);
        if after_word && before_word {
            out.push(' ');
        }
    }
    out
}
