//! Unified type mapping between Rust types and storage representations
//! This crate provides the scalar value model, column type mapping and the
//! tagged value codec used across the stowage ecosystem

pub mod codec;
pub mod sql;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use codec::{
    decode, decode_deserializable, encode, encode_serializable, CodecError, Json, Storable,
    TaggedValue, ValueKind,
};
pub use sql::{is_optional_type, rust_type_to_column_type, ColumnType};
pub use types::{
    format_timestamp, parse_timestamp, FromScalar, Record, ScalarConversionError, ScalarValue,
};
pub use validate::supports_direct_scalar_conversion;
