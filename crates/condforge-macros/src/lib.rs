//! Derive macros for CondForge candidate types.

use proc_macro::TokenStream;
use syn::parse::Parser;
use syn::{parse_macro_input, Attribute, DeriveInput, Expr, Lit, Meta};

mod inspect_enum;
mod inspectable;

/// Publishes the named fields of a struct as readable properties.
///
/// Property names default to the field name in PascalCase (`hit_points`
/// becomes `HitPoints`). Struct attribute `#[inspect(name = "...")]`
/// overrides the type name; field attributes `#[inspect(rename = "...")]`
/// and `#[inspect(skip)]` adjust single fields. Every published field type
/// must implement `PropertyValue`.
#[proc_macro_derive(Inspectable, attributes(inspect))]
pub fn derive_inspectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    inspectable::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Exposes a field-less enum as an enumeration property type.
///
/// Member names are the variant names unless renamed with
/// `#[inspect(rename = "...")]`.
#[proc_macro_derive(InspectEnum, attributes(inspect))]
pub fn derive_inspect_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    inspect_enum::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn inspect_attributes(attrs: &[Attribute]) -> Vec<Meta> {
    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("inspect"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => parser.parse2(list.tokens.clone()).ok(),
            _ => None,
        })
        .flatten()
        .collect()
}

fn has_flag(attrs: &[Attribute], key: &str) -> bool {
    inspect_attributes(attrs)
        .iter()
        .any(|meta| matches!(meta, Meta::Path(path) if path.is_ident(key)))
}

fn parse_attribute_string(attrs: &[Attribute], key: &str) -> Option<String> {
    inspect_attributes(attrs).into_iter().find_map(|meta| {
        if let Meta::NameValue(nv) = meta {
            if nv.path.is_ident(key) {
                if let Expr::Lit(expr_lit) = &nv.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value());
                    }
                }
            }
        }
        None
    })
}

fn pascal_case(ident: &str) -> String {
    ident
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
