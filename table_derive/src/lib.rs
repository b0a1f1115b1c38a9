//! Procedural macros for generating record mappings
//!
//! This crate provides the `Record` derive and the `#[model]` convenience
//! attribute, generating the record mapping, row decoding and table schema
//! of a struct at compile time.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod model_macro;
mod parsing;

use codegen::{generate_from_record_impl, generate_record_mapping_impl, generate_record_schema_impl};
use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};

/// Derive `RecordMapping`, `FromRecord` and `RecordSchema`
///
/// ```ignore
/// #[derive(Debug, Clone, Record)]
/// #[table(name = "note")]
/// pub struct Note {
///     #[primary_key]
///     pub id: Uuid,
///
///     #[column(unique)]
///     pub title: String,
///
///     #[column(name = "createdAt", type = "DATE")]
///     pub created_at: DateTime<Utc>,
///
///     #[column(default = 0)]
///     pub views: i64,
///
///     #[column(skip)]
///     pub rendered: Option<String>,
/// }
/// ```
///
/// Table and column names are validated here, so an invalid or reserved
/// name is a compile error rather than a runtime one.
#[proc_macro_derive(Record, attributes(table, primary_key, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    // Parse table attributes - handle errors properly
    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error().into(),
    };

    // Parse field attributes - handle errors properly
    let field_info = match parse_field_attributes(&input.data) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let mapping_impl = match generate_record_mapping_impl(name, &table_info, &field_info) {
        Ok(tokens) => tokens,
        Err(e) => return e.to_compile_error().into(),
    };
    let from_record_impl = generate_from_record_impl(name, &field_info);
    let schema_impl = generate_record_schema_impl(name, &table_info, &field_info);

    let expanded = quote::quote! {
        #mapping_impl
        #from_record_impl
        #schema_impl
    };

    TokenStream::from(expanded)
}

/// Convenience attribute macro that adds the derives a record type needs
///
/// Usage:
/// ```ignore
/// use table_derive::model;
///
/// #[model]
/// #[table(name = "note")]
/// pub struct Note {
///     #[primary_key]
///     pub id: String,
///     pub title: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
