//! Crate path resolution for renamed dependencies.
//!
//! Generated code refers to `::flag_binder` unless the struct carries
//! `#[flag(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the path generated code uses to reach the runtime crate.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::flag_binder }, |path| quote! { #path })
}
