// #[derive(InspectEnum)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, LitStr};

use crate::parse_attribute_string;

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(InspectEnum)] does not support generic types",
        ));
    }

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(InspectEnum)] only works on enums",
            ))
        }
    };

    if let Some(variant) = variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        return Err(Error::new_spanned(
            variant,
            "#[derive(InspectEnum)] requires field-less variants",
        ));
    }

    let type_name = parse_attribute_string(&input.attrs, "name").unwrap_or_else(|| name.to_string());
    let type_name = LitStr::new(&type_name, name.span());

    let members = variants.iter().map(|variant| {
        let ident = &variant.ident;
        let member = parse_attribute_string(&variant.attrs, "rename")
            .unwrap_or_else(|| ident.to_string());
        let member = LitStr::new(&member, ident.span());
        quote! { (#member, #name::#ident as i64) }
    });

    let arms = variants.iter().map(|variant| {
        let ident = &variant.ident;
        quote! { #name::#ident => #name::#ident as i64 }
    });

    let expanded = quote! {
        impl ::condforge::__internal::InspectEnum for #name {
            fn enum_descriptor() -> &'static ::condforge::__internal::EnumDescriptor {
                static DESCRIPTOR: ::condforge::__internal::EnumDescriptor =
                    ::condforge::__internal::EnumDescriptor::new(#type_name, &[#(#members),*]);
                &DESCRIPTOR
            }

            fn discriminant(&self) -> i64 {
                match self {
                    #(#arms,)*
                }
            }
        }

        impl ::condforge::__internal::PropertyValue for #name {
            fn value_type() -> ::condforge::__internal::ValueType {
                ::condforge::__internal::ValueType::Enum(
                    <#name as ::condforge::__internal::InspectEnum>::enum_descriptor(),
                )
            }

            fn to_value(&self) -> ::condforge::__internal::Value<'_> {
                ::condforge::__internal::Value::Enum(
                    ::condforge::__internal::InspectEnum::to_enum_value(self),
                )
            }
        }
    };

    Ok(expanded)
}
