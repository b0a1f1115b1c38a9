//! Validation utilities for type mapping
//!
//! This module provides validation functions
//! for type mapping operations.

/// Check if a Rust type converts directly into a `ScalarValue` and back.
///
/// Used by the record derive to reject field types it cannot map.
pub fn supports_direct_scalar_conversion(rust_type: &str) -> bool {
    let normalized = rust_type.replace(' ', "");
    let inner = normalized
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(&normalized);

    matches!(
        inner,
        "String"
            | "i32"
            | "i64"
            | "f64"
            | "bool"
            | "Vec<u8>"
            | "Uuid"
            | "uuid::Uuid"
            | "DateTime<Utc>"
            | "chrono::DateTime<chrono::Utc>"
            | "serde_json::Value"
    )
}
