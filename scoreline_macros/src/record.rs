use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let collection = extract_collection(&input);

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let id_field = match extract_marked_field(&fields, "id").or_else(|| field_named(&fields, "id")) {
        Some(ident) => ident,
        None => {
            return syn::Error::new_spanned(
                name,
                "Record derive: no field marked with #[record(id)] and no field named `id`",
            )
            .to_compile_error()
            .into()
        }
    };

    let soft_delete = extract_marked_field(&fields, "soft_delete").map(|field| {
        quote! {
            fn deleted_at(&self) -> Option<scoreline::Timestamp> {
                self.#field
            }

            fn set_deleted_at(&mut self, at: Option<scoreline::Timestamp>) {
                self.#field = at;
            }
        }
    });

    let expanded = quote! {
        impl scoreline::Record for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> u64 {
                self.#id_field
            }

            fn set_id(&mut self, id: u64) {
                self.#id_field = id;
            }

            #soft_delete
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(input: &DeriveInput) -> Result<Vec<syn::Field>, syn::Error> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().cloned().collect());
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Record derive only supports structs with named fields",
    ))
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    format!("{}s", to_snake_case(&input.ident.to_string()))
}

/// Find the field carrying `#[record(<marker>)]`.
fn extract_marked_field(fields: &[syn::Field], marker: &str) -> Option<Ident> {
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            let mut marked = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(marker) {
                    marked = true;
                }
                Ok(())
            });
            if marked {
                return field.ident.clone();
            }
        }
    }
    None
}

fn field_named(fields: &[syn::Field], name: &str) -> Option<Ident> {
    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == name)
        .cloned()
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
