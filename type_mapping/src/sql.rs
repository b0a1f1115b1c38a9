//! SQL type conversion utilities
//!
//! This module handles conversion between Rust types
//! and their column type equivalents.

use serde::{Deserialize, Serialize};

/// Declared type of a table column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Double,
    Numeric,
    Boolean,
    Date,
    Blob,
    Any,
    Custom(String),
}

impl ColumnType {
    pub fn to_sql(&self) -> &str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::Blob => "BLOB",
            ColumnType::Any => "ANY",
            ColumnType::Custom(name) => name,
        }
    }

    /// Parse a column type keyword as written in `#[column(type = "...")]`
    pub fn from_keyword(keyword: &str) -> ColumnType {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "TEXT" => ColumnType::Text,
            "INTEGER" | "INT" => ColumnType::Integer,
            "REAL" => ColumnType::Real,
            "DOUBLE" => ColumnType::Double,
            "NUMERIC" => ColumnType::Numeric,
            "BOOLEAN" | "BOOL" => ColumnType::Boolean,
            "DATE" => ColumnType::Date,
            "BLOB" => ColumnType::Blob,
            "ANY" => ColumnType::Any,
            _ => ColumnType::Custom(keyword.trim().to_string()),
        }
    }
}

/// Map Rust type names to column types for DDL generation
pub fn rust_type_to_column_type(rust_type: &str) -> ColumnType {
    // Normalize type string by removing all whitespace for consistent matching
    let normalized = rust_type.replace(' ', "");
    let inner = strip_option(&normalized);
    match inner {
        "String" | "&str" => ColumnType::Text,
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => ColumnType::Integer,
        "u64" => ColumnType::Numeric,
        "f32" => ColumnType::Real,
        "f64" => ColumnType::Double,
        "bool" => ColumnType::Boolean,
        "Uuid" | "uuid::Uuid" => ColumnType::Text,
        "DateTime<Utc>" | "chrono::DateTime<chrono::Utc>" => ColumnType::Date,
        "Vec<u8>" => ColumnType::Blob,
        "serde_json::Value" | "Value" => ColumnType::Text,
        _ => ColumnType::Any, // default fallback
    }
}

/// Check if a Rust type is Optional (nullable in SQL)
pub fn is_optional_type(rust_type: &str) -> bool {
    rust_type.trim().starts_with("Option")
}

fn strip_option(normalized: &str) -> &str {
    normalized
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_type_mapping() {
        assert_eq!(rust_type_to_column_type("String"), ColumnType::Text);
        assert_eq!(rust_type_to_column_type("Option < i64 >"), ColumnType::Integer);
        assert_eq!(
            rust_type_to_column_type("chrono::DateTime<chrono::Utc>"),
            ColumnType::Date
        );
        assert_eq!(rust_type_to_column_type("Vec<u8>"), ColumnType::Blob);
        assert_eq!(rust_type_to_column_type("MyEnum"), ColumnType::Any);
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!(ColumnType::from_keyword("text"), ColumnType::Text);
        assert_eq!(ColumnType::from_keyword("int"), ColumnType::Integer);
        assert_eq!(
            ColumnType::from_keyword("VARCHAR(32)"),
            ColumnType::Custom("VARCHAR(32)".to_string())
        );
        assert_eq!(ColumnType::Custom("JSONB".into()).to_sql(), "JSONB");
    }

    #[test]
    fn test_optional_detection() {
        assert!(is_optional_type("Option<String>"));
        assert!(!is_optional_type("String"));
    }
}
