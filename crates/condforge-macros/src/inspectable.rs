// #[derive(Inspectable)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, LitStr};

use crate::{has_flag, parse_attribute_string, pascal_case};

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Inspectable)] does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "#[derive(Inspectable)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(Inspectable)] only works on structs",
            ))
        }
    };

    let type_name = parse_attribute_string(&input.attrs, "name").unwrap_or_else(|| name.to_string());
    let type_name = LitStr::new(&type_name, name.span());

    let mut properties = Vec::new();
    for field in fields.iter().filter(|f| !has_flag(&f.attrs, "skip")) {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let property_name = parse_attribute_string(&field.attrs, "rename")
            .unwrap_or_else(|| pascal_case(&field_name.to_string()));
        let property_name = LitStr::new(&property_name, field_name.span());

        properties.push(quote! {
            {
                fn get(obj: &dyn ::std::any::Any) -> ::condforge::__internal::Value<'_> {
                    match obj.downcast_ref::<#name>() {
                        Some(owner) => <#field_type as ::condforge::__internal::PropertyValue>::to_value(&owner.#field_name),
                        None => ::condforge::__internal::Value::Null,
                    }
                }
                ::condforge::__internal::PropertyDescriptor::new(
                    #property_name,
                    <#field_type as ::condforge::__internal::PropertyValue>::value_type(),
                    get as ::condforge::__internal::Getter,
                )
            }
        });
    }

    let expanded = quote! {
        impl ::condforge::__internal::Inspectable for #name {
            fn type_descriptor() -> &'static ::condforge::__internal::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::condforge::__internal::TypeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::condforge::__internal::TypeDescriptor::new::<#name>(
                        #type_name,
                        ::std::vec![#(#properties),*],
                    )
                })
            }
        }
    };

    Ok(expanded)
}
