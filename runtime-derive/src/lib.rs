//! Derive macros for the small fieldless enums scattered through this
//! runtime (`ValueKind`, and any future closed enum that needs a name or
//! a `FromStr`). Adapted from the teacher's `util-derive`: same two
//! macros, `InteropGetName` renamed to `KindName` and reworked to hand
//! back a `&'static str` instead of a nul-terminated `&'static [u8]`
//! (this runtime has no C ABI to feed), `EnumFromStr` carried over
//! unchanged but repointed at `::runtime_util` instead of `::util`.

use proc_macro::TokenStream;
use quote::quote;

fn get_enum_variants(
    input: &syn::DeriveInput,
) -> &syn::punctuated::Punctuated<syn::Variant, syn::token::Comma> {
    let variants = match &input.data {
        syn::Data::Enum(enum_item) => &enum_item.variants,
        _ => panic!("Input must be an enum."),
    };

    assert!(
        variants.iter().all(|v| v.fields.is_empty()),
        "All variants must have no fields."
    );

    variants
}

#[proc_macro_derive(KindName)]
pub fn kind_name_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let variants = get_enum_variants(&syn_item);

    let variant_names = variants.iter().map(|v| v.ident.to_string());

    let expanded = quote! {
        impl ::runtime_util::KindName for #name {
            fn kind_name(&self) -> &'static str {
                const NAMES: &[&str] = &[#(#variant_names),*];
                NAMES[*self as usize]
            }
        }
    };
    expanded.into()
}

#[proc_macro_derive(EnumFromStr)]
pub fn enum_from_str_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let name_str = name.to_string();
    let variants = get_enum_variants(&syn_item);
    let literals = variants.iter().map(|v| v.ident.to_string());
    let identifiers = variants.iter().map(|v| &v.ident);

    let expanded = quote! {
        impl ::runtime_util::EnumFromStr for #name {
            fn from_str(s: &str) -> Result<#name, ::runtime_util::ParseEnumError> {
                match s {
                    #( #literals => Ok(#name::#identifiers), )*
                    _ => Err(::runtime_util::ParseEnumError {
                        value: s.to_string(),
                        enum_name: #name_str,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = ::runtime_util::ParseEnumError;

            fn from_str(s: &str) -> Result<#name, ::runtime_util::ParseEnumError> {
                EnumFromStr::from_str(s)
            }
        }
    };

    expanded.into()
}
