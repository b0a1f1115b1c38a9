//! Code generation for `#[derive(Record)]`
//!
//! Emits `RecordMapping`, `FromRecord` and `RecordSchema` implementations.
//! Generated code refers to `::store_object`, so the deriving crate must
//! depend on it.

use crate::parsing::{FieldInfo, TableInfo};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub fn generate_record_mapping_impl(
    name: &Ident,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> syn::Result<TokenStream> {
    let table_name = &table_info.name;
    let pk = field_info.primary_key().ok_or_else(|| {
        syn::Error::new(name.span(), "Record requires a #[primary_key] field")
    })?;
    let pk_ident = &pk.ident;
    let pk_column = &pk.column_name;

    let persisted: Vec<_> = field_info.persisted().collect();
    let capacity = persisted.len();
    let inserts = persisted.iter().map(|column| {
        let ident = &column.ident;
        let column_name = &column.column_name;
        quote! {
            values.insert(
                #column_name.to_string(),
                ::store_object::type_mapping::ScalarValue::from(::std::clone::Clone::clone(&self.#ident)),
            );
        }
    });

    Ok(quote! {
        impl ::store_object::RecordMapping for #name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key_field() -> &'static str {
                #pk_column
            }

            fn primary_key_value(&self) -> ::store_object::type_mapping::ScalarValue {
                ::store_object::type_mapping::ScalarValue::from(::std::clone::Clone::clone(&self.#pk_ident))
            }

            fn field_values(&self) -> ::std::collections::HashMap<String, ::store_object::type_mapping::ScalarValue> {
                let mut values = ::std::collections::HashMap::with_capacity(#capacity);
                #(#inserts)*
                values
            }
        }
    })
}

pub fn generate_from_record_impl(name: &Ident, field_info: &FieldInfo) -> TokenStream {
    let initializers = field_info.columns.iter().map(|column| {
        let ident = &column.ident;
        let column_name = &column.column_name;
        if column.skip {
            quote! { #ident: ::std::default::Default::default(), }
        } else {
            quote! { #ident: ::store_object::read_field(row, #column_name)?, }
        }
    });

    quote! {
        impl ::store_object::FromRecord for #name {
            fn from_record(
                row: &::store_object::type_mapping::Record,
            ) -> ::std::result::Result<Self, ::store_object::StoreError> {
                ::std::result::Result::Ok(Self {
                    #(#initializers)*
                })
            }
        }
    }
}

pub fn generate_record_schema_impl(
    name: &Ident,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let table_name = &table_info.name;

    let columns = field_info.persisted().map(|column| {
        let column_name = &column.column_name;
        let column_type = &column.column_type;

        let mut modifiers = Vec::new();
        if column.is_primary_key {
            modifiers.push(quote! { .primary_key() });
        }
        if column.is_not_null {
            modifiers.push(quote! { .not_null() });
        }
        if column.is_unique {
            modifiers.push(quote! { .unique() });
        }
        if let Some(default) = &column.default_value {
            modifiers.push(quote! { .default(#default) });
        }

        quote! {
            .column(
                ::store_object::ColumnDefinition::new(
                    #column_name,
                    ::store_object::type_mapping::ColumnType::from_keyword(#column_type),
                )
                #(#modifiers)*
            )
        }
    });

    quote! {
        impl ::store_object::RecordSchema for #name {
            fn table_definition() -> ::store_object::TableDefinition {
                ::store_object::TableDefinition::new(#table_name)
                    #(#columns)*
            }
        }
    }
}
