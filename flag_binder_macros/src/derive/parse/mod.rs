//! Attribute parsing for the `FlagSource` derive.
//!
//! Both struct and field metadata live in `#[flag(...)]` attributes. Unknown
//! keys are rejected so a misspelt `name` cannot silently drop a flag.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr};

mod literals;
mod type_utils;

use literals::{lit_char, lit_str};
pub(crate) use type_utils::{ValueShape, classify, type_name};

/// Struct-level `#[flag(...)]` metadata.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the path generated code uses for the runtime crate.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[flag(...)]` metadata.
///
/// `name` is kept as a literal so validation errors can point at it.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub name: Option<LitStr>,
    pub short: Option<char>,
    pub describe: Option<String>,
    pub default: Option<String>,
    pub flatten: bool,
}

impl FieldAttrs {
    /// Returns `true` when any per-flag key was supplied.
    pub(crate) const fn has_flag_metadata(&self) -> bool {
        self.name.is_some()
            || self.short.is_some()
            || self.describe.is_some()
            || self.default.is_some()
    }
}

/// A named struct field together with its parsed attributes.
#[derive(Clone)]
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// Iterate all `#[flag(...)]` attributes once and apply a callback.
fn parse_flag_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn meta_key(meta: &ParseNestedMeta) -> String {
    meta.path
        .get_ident()
        .map_or_else(String::new, ToString::to_string)
}

fn reject_duplicate<T>(slot: Option<&T>, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` attribute")));
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, allowed: &str) -> syn::Error {
    let key = meta_key(meta);
    meta.error(format!("unknown flag attribute `{key}`; expected one of {allowed}"))
}

/// Parses `#[flag(...)]` attributes applied to the struct itself.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_flag_attrs(attrs, |meta| match meta_key(meta).as_str() {
        "crate" => {
            reject_duplicate(out.crate_path.as_ref(), meta, "crate")?;
            let literal = lit_str(meta, "crate")?;
            let path = literal.parse::<syn::Path>()?;
            out.crate_path = Some(path);
            Ok(())
        }
        _ => Err(unknown_key(meta, "`crate`")),
    })?;
    Ok(out)
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    match meta_key(meta).as_str() {
        "name" => {
            reject_duplicate(out.name.as_ref(), meta, "name")?;
            out.name = Some(lit_str(meta, "name")?);
        }
        "short" => {
            reject_duplicate(out.short.as_ref(), meta, "short")?;
            out.short = Some(lit_char(meta, "short")?);
        }
        "describe" => {
            reject_duplicate(out.describe.as_ref(), meta, "describe")?;
            out.describe = Some(lit_str(meta, "describe")?.value());
        }
        "default" => {
            reject_duplicate(out.default.as_ref(), meta, "default")?;
            out.default = Some(lit_str(meta, "default")?.value());
        }
        "flatten" => {
            if out.flatten {
                return Err(meta.error("duplicate `flatten` attribute"));
            }
            out.flatten = true;
        }
        _ => {
            return Err(unknown_key(
                meta,
                "`name`, `short`, `describe`, `default`, or `flatten`",
            ));
        }
    }
    Ok(())
}

/// Parses field-level `#[flag(...)]` attributes.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_flag_attrs(attrs, |meta| apply_field_attr(meta, &mut out))?;
    Ok(out)
}

/// Gathers struct attributes and every named field in one pass.
///
/// Unit structs are accepted and produce no fields.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FlagSource can only be derived for structs",
        ));
    };
    let named = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "FlagSource requires named fields",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "FlagSource requires named fields"));
        };
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }
    Ok(ParsedInput {
        struct_attrs,
        fields,
    })
}
