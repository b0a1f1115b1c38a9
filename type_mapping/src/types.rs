//! Type mapping definitions
//!
//! This module provides the scalar value model shared by the query compiler,
//! the database adapters and the record mapping layer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// A single storable value as it travels between records, compiled queries
/// and storage engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Blob(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
}

/// Field name -> value map describing one persisted row or record
pub type Record = HashMap<String, ScalarValue>;

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Name of the variant, used in conversion errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            ScalarValue::Null => "Null",
            ScalarValue::Text(_) => "Text",
            ScalarValue::Integer(_) => "Integer",
            ScalarValue::Real(_) => "Real",
            ScalarValue::Boolean(_) => "Boolean",
            ScalarValue::Blob(_) => "Blob",
            ScalarValue::Timestamp(_) => "Timestamp",
            ScalarValue::Uuid(_) => "Uuid",
            ScalarValue::Json(_) => "Json",
        }
    }

    /// Render the value as an inline SQL literal (used for column defaults)
    pub fn to_sql_literal(&self) -> String {
        match self {
            ScalarValue::Null => "NULL".to_string(),
            ScalarValue::Text(s) => quote_literal(s),
            ScalarValue::Integer(i) => i.to_string(),
            ScalarValue::Real(f) => f.to_string(),
            ScalarValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
            ScalarValue::Blob(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
                format!("X'{}'", hex)
            }
            ScalarValue::Timestamp(ts) => quote_literal(&format_timestamp(ts)),
            ScalarValue::Uuid(id) => quote_literal(&id.to_string()),
            ScalarValue::Json(v) => quote_literal(&v.to_string()),
        }
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Fixed textual timestamp format: RFC 3339, nanosecond precision, `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<String> for ScalarValue {
    fn from(val: String) -> Self {
        ScalarValue::Text(val)
    }
}

impl From<&str> for ScalarValue {
    fn from(val: &str) -> Self {
        ScalarValue::Text(val.to_string())
    }
}

impl From<i64> for ScalarValue {
    fn from(val: i64) -> Self {
        ScalarValue::Integer(val)
    }
}

impl From<i32> for ScalarValue {
    fn from(val: i32) -> Self {
        ScalarValue::Integer(val as i64)
    }
}

impl From<i16> for ScalarValue {
    fn from(val: i16) -> Self {
        ScalarValue::Integer(val as i64)
    }
}

impl From<u32> for ScalarValue {
    fn from(val: u32) -> Self {
        ScalarValue::Integer(val as i64)
    }
}

impl From<f64> for ScalarValue {
    fn from(val: f64) -> Self {
        ScalarValue::Real(val)
    }
}

impl From<f32> for ScalarValue {
    fn from(val: f32) -> Self {
        ScalarValue::Real(val as f64)
    }
}

impl From<bool> for ScalarValue {
    fn from(val: bool) -> Self {
        ScalarValue::Boolean(val)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(val: Vec<u8>) -> Self {
        ScalarValue::Blob(val)
    }
}

impl From<Uuid> for ScalarValue {
    fn from(val: Uuid) -> Self {
        ScalarValue::Uuid(val)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(val: DateTime<Utc>) -> Self {
        ScalarValue::Timestamp(val)
    }
}

impl From<serde_json::Value> for ScalarValue {
    fn from(val: serde_json::Value) -> Self {
        ScalarValue::Json(val)
    }
}

impl<T> From<Option<T>> for ScalarValue
where
    T: Into<ScalarValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => ScalarValue::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Could not convert {found} value to '{target}'")]
pub struct ScalarConversionError {
    pub target: &'static str,
    pub found: &'static str,
}

impl ScalarConversionError {
    fn new(target: &'static str, value: &ScalarValue) -> Self {
        Self {
            target,
            found: value.kind_name(),
        }
    }
}

/// Conversion from a stored scalar back into a Rust field type.
///
/// Engines store booleans as integers and timestamps, UUIDs and JSON as text,
/// so each conversion accepts the storage-class representation as well as the
/// exact variant.
pub trait FromScalar: Sized {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError>;
}

impl FromScalar for String {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Text(s) => Ok(s),
            other => Err(ScalarConversionError::new("String", &other)),
        }
    }
}

impl FromScalar for i64 {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Integer(i) => Ok(i),
            ScalarValue::Boolean(b) => Ok(b as i64),
            other => Err(ScalarConversionError::new("i64", &other)),
        }
    }
}

impl FromScalar for i32 {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Integer(i) => {
                i32::try_from(i).map_err(|_| ScalarConversionError::new("i32", &ScalarValue::Integer(i)))
            }
            other => Err(ScalarConversionError::new("i32", &other)),
        }
    }
}

impl FromScalar for f64 {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Real(f) => Ok(f),
            ScalarValue::Integer(i) => Ok(i as f64),
            other => Err(ScalarConversionError::new("f64", &other)),
        }
    }
}

impl FromScalar for bool {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Boolean(b) => Ok(b),
            ScalarValue::Integer(0) => Ok(false),
            ScalarValue::Integer(1) => Ok(true),
            other => Err(ScalarConversionError::new("bool", &other)),
        }
    }
}

impl FromScalar for Vec<u8> {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Blob(bytes) => Ok(bytes),
            other => Err(ScalarConversionError::new("Vec<u8>", &other)),
        }
    }
}

impl FromScalar for DateTime<Utc> {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Timestamp(ts) => Ok(ts),
            ScalarValue::Text(ref s) => {
                parse_timestamp(s).ok_or_else(|| ScalarConversionError::new("DateTime<Utc>", &value))
            }
            other => Err(ScalarConversionError::new("DateTime<Utc>", &other)),
        }
    }
}

impl FromScalar for Uuid {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Uuid(id) => Ok(id),
            ScalarValue::Text(ref s) => {
                Uuid::parse_str(s).map_err(|_| ScalarConversionError::new("Uuid", &value))
            }
            other => Err(ScalarConversionError::new("Uuid", &other)),
        }
    }
}

impl FromScalar for serde_json::Value {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Json(v) => Ok(v),
            ScalarValue::Text(ref s) => serde_json::from_str(s)
                .map_err(|_| ScalarConversionError::new("serde_json::Value", &value)),
            other => Err(ScalarConversionError::new("serde_json::Value", &other)),
        }
    }
}

impl<T: FromScalar> FromScalar for Option<T> {
    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarConversionError> {
        match value {
            ScalarValue::Null => Ok(None),
            other => T::from_scalar(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_option_maps_to_null() {
        let none: Option<String> = None;
        assert_eq!(ScalarValue::from(none), ScalarValue::Null);
        assert_eq!(ScalarValue::from(Some(5i32)), ScalarValue::Integer(5));
    }

    #[test]
    fn test_storage_class_coercions() {
        assert!(bool::from_scalar(ScalarValue::Integer(1)).unwrap());
        assert!(!bool::from_scalar(ScalarValue::Integer(0)).unwrap());

        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let text = ScalarValue::Text(format_timestamp(&ts));
        assert_eq!(DateTime::<Utc>::from_scalar(text).unwrap(), ts);

        let id = Uuid::new_v4();
        assert_eq!(Uuid::from_scalar(ScalarValue::Text(id.to_string())).unwrap(), id);

        assert_eq!(Option::<i64>::from_scalar(ScalarValue::Null).unwrap(), None);
    }

    #[test]
    fn test_conversion_error_names_both_sides() {
        let err = i64::from_scalar(ScalarValue::Text("x".into())).unwrap_err();
        assert_eq!(err.target, "i64");
        assert_eq!(err.found, "Text");
    }

    #[test]
    fn test_sql_literals() {
        assert_eq!(ScalarValue::from("it's").to_sql_literal(), "'it''s'");
        assert_eq!(ScalarValue::Boolean(true).to_sql_literal(), "1");
        assert_eq!(ScalarValue::Blob(vec![0xAB, 0x01]).to_sql_literal(), "X'AB01'");
        assert_eq!(ScalarValue::Null.to_sql_literal(), "NULL");
    }
}
