use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that describes the input record's fields for the `schema` command.
///
/// For each field, extracts:
/// - Field name (respects #[serde(rename = "...")])
/// - Required (false if the type is Option<T> or the field has #[serde(default)])
/// - Description (from doc comments)
///
/// Generates an `input_fields() -> &'static [InputField]` method. An `InputField`
/// struct with `name`, `required` and `description` must be in scope at the derive site.
#[proc_macro_derive(InputSchema, attributes(serde))]
pub fn derive_input_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "InputSchema only supports named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "InputSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut field_entries = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let serde = match serde_options(&field.attrs) {
            Ok(serde) => serde,
            Err(err) => return err.to_compile_error().into(),
        };
        let field_name = serde.rename.unwrap_or_else(|| ident.to_string());
        let required = !serde.has_default && !is_option_type(&field.ty);
        let description = get_doc_comment(&field.attrs);

        field_entries.push(quote! {
            InputField {
                name: #field_name,
                required: #required,
                description: #description,
            }
        });
    }

    let expanded = quote! {
        impl #name {
            pub fn input_fields() -> &'static [InputField] {
                static FIELDS: &[InputField] = &[
                    #(#field_entries),*
                ];
                FIELDS
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeOptions {
    rename: Option<String>,
    has_default: bool,
}

/// Field-level serde options. Other serde keys are skipped along with their
/// values; a malformed attribute is a compile error.
fn serde_options(attrs: &[syn::Attribute]) -> syn::Result<SerdeOptions> {
    let mut options = SerdeOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("default") {
                options.has_default = true;
                if meta.input.peek(syn::Token![=]) {
                    let _: syn::LitStr = meta.value()?.parse()?;
                }
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(options)
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn rename_and_default_are_read() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[serde(rename = "filer_age")]),
            parse_quote!(#[serde(default, deserialize_with = "parse_age")]),
        ];
        let options = serde_options(&attrs).unwrap();
        assert_eq!(options.rename.as_deref(), Some("filer_age"));
        assert!(options.has_default);
    }

    #[test]
    fn other_attributes_are_ignored() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[doc = "Filer age"])];
        let options = serde_options(&attrs).unwrap();
        assert!(options.rename.is_none());
        assert!(!options.has_default);
    }

    #[test]
    fn malformed_rename_is_an_error() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[serde(rename = 5)])];
        assert!(serde_options(&attrs).is_err());
    }
}
