//! Token generation for the `FlagSource` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive::parse::{ParsedField, ValueShape, classify, type_name};

/// Per-field output: one entry for `describe` and one for `flag_fields`.
struct FieldTokens {
    describe: TokenStream,
    bind: TokenStream,
}

fn spec_tokens(field: &ParsedField, long: &syn::LitStr, krate: &TokenStream) -> TokenStream {
    let attrs = &field.attrs;
    let short = attrs.short.map_or_else(
        || quote! { ::core::option::Option::None },
        |c| quote! { ::core::option::Option::Some(#c) },
    );
    let describe = attrs.describe.as_deref().unwrap_or_default();
    let default = attrs.default.as_deref().unwrap_or_default();
    let ty_name = type_name(&field.ty);
    quote! {
        #krate::FlagSpec::new(#long, #short, #describe, #default, #ty_name)
    }
}

fn field_tokens(field: &ParsedField, krate: &TokenStream) -> Option<FieldTokens> {
    let ident = &field.ident;
    let ty = &field.ty;
    if field.attrs.flatten {
        return Some(FieldTokens {
            describe: quote! {
                fields.extend(<#ty as #krate::FlagSource>::describe(&self.#ident));
            },
            bind: quote! {
                fields.extend(<#ty as #krate::FlagSource>::flag_fields(&mut self.#ident));
            },
        });
    }

    let long = field.attrs.name.as_ref()?;
    let spec = spec_tokens(field, long, krate);
    let tokens = if classify(ty) == ValueShape::Unsupported {
        FieldTokens {
            describe: quote! {
                fields.push(#krate::FieldDescriptor::unsupported(#spec));
            },
            bind: quote! {
                fields.push(#krate::FlagField::new(#spec, #krate::FieldSlot::Unsupported));
            },
        }
    } else {
        FieldTokens {
            describe: quote! {
                fields.push(#krate::FieldDescriptor::new(#spec, &self.#ident));
            },
            bind: quote! {
                fields.push(#krate::FlagField::new(
                    #spec,
                    #krate::FieldSlot::Value(&mut self.#ident),
                ));
            },
        }
    };
    Some(tokens)
}

/// Wraps per-field statements into a function body that returns `fields`.
fn collect_body(statements: &[TokenStream]) -> TokenStream {
    if statements.is_empty() {
        return quote! { ::std::vec::Vec::new() };
    }
    quote! {
        let mut fields = ::std::vec::Vec::new();
        #( #statements )*
        fields
    }
}

/// Renders the complete `FlagSource` implementation for the input struct.
pub(crate) fn generate_impl(
    input: &DeriveInput,
    fields: &[ParsedField],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let (describe, bind): (Vec<_>, Vec<_>) = fields
        .iter()
        .filter_map(|field| field_tokens(field, krate))
        .map(|tokens| (tokens.describe, tokens.bind))
        .unzip();
    let describe_body = collect_body(&describe);
    let bind_body = collect_body(&bind);

    quote! {
        impl #impl_generics #krate::FlagSource for #ident #ty_generics #where_clause {
            fn describe(&self) -> ::std::vec::Vec<#krate::FieldDescriptor> {
                #describe_body
            }

            fn flag_fields(&mut self) -> ::std::vec::Vec<#krate::FlagField<'_>> {
                #bind_body
            }
        }
    }
}
