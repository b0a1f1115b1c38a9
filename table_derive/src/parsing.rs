//! Parsing utilities for table and column attributes
//!
//! This module handles the parsing of `#[table]`, `#[primary_key]` and
//! `#[column]` attributes and validation of table and column names.

use quote::quote;
use syn::{Attribute, Data, Error, Expr, Fields, Ident, LitStr, Result};
use type_mapping::{is_optional_type, rust_type_to_column_type, supports_direct_scalar_conversion};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_field_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid field name '{}': {}", name, e)))
}

/// Validation logic that mirrors store_object::validation
/// This ensures compile-time validation matches runtime validation
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if name.len() > 63 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 63)",
            name,
            name.len()
        ));
    }

    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Check if a name is a reserved SQL keyword
/// This mirrors the list in store_object::validation
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "ALL", "ALTER", "AND", "AS", "BETWEEN", "BY", "CASE", "CHECK", "COLLATE", "COLUMN",
        "CONFLICT", "CONSTRAINT", "CREATE", "DEFAULT", "DELETE", "DISTINCT", "DROP", "ELSE",
        "END", "ESCAPE", "EXCEPT", "EXISTS", "FOREIGN", "FROM", "GROUP", "HAVING", "IN",
        "INDEX", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "LIKE", "LIMIT", "NOT",
        "NOTHING", "NULL", "OFFSET", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "RETURNING",
        "SELECT", "SET", "TABLE", "THEN", "TO", "TRANSACTION", "UNION", "UNIQUE", "UPDATE",
        "USING", "VALUES", "WHEN", "WHERE", "WITH",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

#[derive(Debug)]
pub struct TableInfo {
    pub name: String,
}

pub struct ColumnInfo {
    pub ident: Ident,
    /// Column name in the table (defaults to the field name)
    pub column_name: String,
    /// Type keyword written into the DDL
    pub column_type: String,
    pub is_primary_key: bool,
    pub is_not_null: bool,
    pub is_unique: bool,
    pub default_value: Option<Expr>,
    /// Not persisted; rebuilt with `Default::default()` when reading
    pub skip: bool,
}

pub struct FieldInfo {
    pub columns: Vec<ColumnInfo>,
}

impl FieldInfo {
    pub fn primary_key(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    pub fn persisted(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| !c.skip)
    }
}

pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name: Option<LitStr> = None;

    for attr in attrs {
        if attr.path().is_ident("table") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    table_name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported table attribute, expected `name`"))
                }
            })?;
        }
    }

    let table_name = table_name.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "table attribute is required: add #[table(name = \"table_name\")] to your struct",
        )
    })?;

    validate_table_name_syn(&table_name.value(), table_name.span())?;

    Ok(TableInfo {
        name: table_name.value(),
    })
}

fn parse_column_attribute(attrs: &[Attribute], column: &mut ColumnInfo) -> Result<()> {
    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let name: LitStr = meta.value()?.parse()?;
                column.column_name = name.value();
            } else if meta.path.is_ident("type") {
                let keyword: LitStr = meta.value()?.parse()?;
                column.column_type = keyword.value();
            } else if meta.path.is_ident("default") {
                column.default_value = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("unique") {
                column.is_unique = true;
            } else if meta.path.is_ident("not_null") {
                column.is_not_null = true;
            } else if meta.path.is_ident("skip") {
                column.skip = true;
            } else {
                return Err(meta.error(
                    "unsupported column attribute, expected one of `name`, `type`, `default`, `unique`, `not_null`, `skip`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(())
}

pub fn parse_field_attributes(data: &Data) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record can only be derived for structs with named fields",
        ));
    };

    let mut columns = Vec::new();

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        let ty = &field.ty;
        // Normalize type string by removing all whitespace for consistent matching
        let type_string = quote!(#ty).to_string().replace(' ', "");
        let is_primary_key = has_attribute(&field.attrs, "primary_key");

        let mut column = ColumnInfo {
            ident: field_name.clone(),
            column_name: field_name.to_string(),
            column_type: rust_type_to_column_type(&type_string).to_sql().to_string(),
            is_primary_key,
            // required Rust types are NOT NULL
            is_not_null: !is_primary_key && !is_optional_type(&type_string),
            is_unique: false,
            default_value: None,
            skip: false,
        };
        parse_column_attribute(&field.attrs, &mut column)?;

        if column.skip {
            if is_primary_key {
                return Err(Error::new_spanned(
                    field,
                    "the primary key cannot be skipped",
                ));
            }
        } else {
            validate_field_name_syn(&column.column_name, field_name.span())?;

            if !supports_direct_scalar_conversion(&type_string) {
                return Err(Error::new_spanned(
                    ty,
                    format!(
                        "field type '{}' has no scalar mapping; use String, i32, i64, f64, bool, Vec<u8>, Uuid, DateTime<Utc>, serde_json::Value or an Option of these",
                        type_string
                    ),
                ));
            }
        }

        columns.push(column);
    }

    let primary_keys = columns.iter().filter(|c| c.is_primary_key).count();
    if primary_keys != 1 {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            format!(
                "Record requires exactly one #[primary_key] field, found {}",
                primary_keys
            ),
        ));
    }

    Ok(FieldInfo { columns })
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
