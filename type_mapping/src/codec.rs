//! Tagged value codec
//!
//! Encodes typed values into self-describing byte strings for opaque
//! key-value and secure stores. Every encoded unit is a fixed-width tag
//! followed by the payload:
//!
//! | tag    | kind   | payload                                  |
//! |--------|--------|------------------------------------------|
//! | `STR:` | String | raw UTF-8                                |
//! | `BIN:` | Bytes  | base64 (standard alphabet, padded)       |
//! | `INT:` | Int    | decimal text                             |
//! | `DBL:` | Double | shortest round-trip decimal text         |
//! | `BOO:` | Bool   | `true` / `false`                         |
//! | `DAT:` | Date   | RFC 3339, nanosecond precision, `Z`      |
//! | `JSN:` | Json   | base64 of the JSON text                  |
//!
//! Decoding is driven by the kind the caller expects; a tag that does not
//! match yields `None` so a slot can be probed speculatively by type.

use crate::types::{format_timestamp, parse_timestamp};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Width in bytes of every tag
pub const TAG_LEN: usize = 4;

const TAG_STRING: &[u8; TAG_LEN] = b"STR:";
const TAG_BYTES: &[u8; TAG_LEN] = b"BIN:";
const TAG_INT: &[u8; TAG_LEN] = b"INT:";
const TAG_DOUBLE: &[u8; TAG_LEN] = b"DBL:";
const TAG_BOOL: &[u8; TAG_LEN] = b"BOO:";
const TAG_DATE: &[u8; TAG_LEN] = b"DAT:";
const TAG_JSON: &[u8; TAG_LEN] = b"JSN:";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logical type of a tagged value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Bytes,
    Int,
    Double,
    Bool,
    Date,
    Json,
}

impl ValueKind {
    pub fn tag(&self) -> &'static [u8; TAG_LEN] {
        match self {
            ValueKind::String => TAG_STRING,
            ValueKind::Bytes => TAG_BYTES,
            ValueKind::Int => TAG_INT,
            ValueKind::Double => TAG_DOUBLE,
            ValueKind::Bool => TAG_BOOL,
            ValueKind::Date => TAG_DATE,
            ValueKind::Json => TAG_JSON,
        }
    }

    /// Identify the kind an encoded unit claims to be
    pub fn of_encoded(bytes: &[u8]) -> Option<ValueKind> {
        let tag = bytes.get(..TAG_LEN)?;
        [
            ValueKind::String,
            ValueKind::Bytes,
            ValueKind::Int,
            ValueKind::Double,
            ValueKind::Bool,
            ValueKind::Date,
            ValueKind::Json,
        ]
        .into_iter()
        .find(|kind| kind.tag().as_slice() == tag)
    }
}

/// A value wrapped with its type marker
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    String(String),
    Bytes(Vec<u8>),
    Int(i64),
    Double(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    Json(serde_json::Value),
}

impl TaggedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TaggedValue::String(_) => ValueKind::String,
            TaggedValue::Bytes(_) => ValueKind::Bytes,
            TaggedValue::Int(_) => ValueKind::Int,
            TaggedValue::Double(_) => ValueKind::Double,
            TaggedValue::Bool(_) => ValueKind::Bool,
            TaggedValue::Date(_) => ValueKind::Date,
            TaggedValue::Json(_) => ValueKind::Json,
        }
    }
}

/// Encode a tagged value into its self-describing byte form
pub fn encode(value: &TaggedValue) -> Vec<u8> {
    let payload = match value {
        TaggedValue::String(s) => s.clone().into_bytes(),
        TaggedValue::Bytes(b) => STANDARD.encode(b).into_bytes(),
        TaggedValue::Int(i) => i.to_string().into_bytes(),
        TaggedValue::Double(f) => f.to_string().into_bytes(),
        TaggedValue::Bool(b) => b.to_string().into_bytes(),
        TaggedValue::Date(ts) => format_timestamp(ts).into_bytes(),
        TaggedValue::Json(v) => STANDARD.encode(v.to_string()).into_bytes(),
    };

    let mut out = Vec::with_capacity(TAG_LEN + payload.len());
    out.extend_from_slice(value.kind().tag());
    out.extend_from_slice(&payload);
    out
}

/// Decode bytes expected to hold a value of `expected` kind.
///
/// Returns `None` on a tag mismatch or an unreadable payload.
pub fn decode(bytes: &[u8], expected: ValueKind) -> Option<TaggedValue> {
    let payload = bytes.strip_prefix(expected.tag().as_slice())?;

    match expected {
        ValueKind::String => String::from_utf8(payload.to_vec())
            .ok()
            .map(TaggedValue::String),
        ValueKind::Bytes => STANDARD.decode(payload).ok().map(TaggedValue::Bytes),
        ValueKind::Int => utf8(payload)?.parse().ok().map(TaggedValue::Int),
        ValueKind::Double => utf8(payload)?.parse().ok().map(TaggedValue::Double),
        ValueKind::Bool => match payload {
            b"true" => Some(TaggedValue::Bool(true)),
            b"false" => Some(TaggedValue::Bool(false)),
            _ => None,
        },
        ValueKind::Date => parse_timestamp(utf8(payload)?).map(TaggedValue::Date),
        ValueKind::Json => {
            let raw = STANDARD.decode(payload).ok()?;
            serde_json::from_slice(&raw).ok().map(TaggedValue::Json)
        }
    }
}

fn utf8(payload: &[u8]) -> Option<&str> {
    std::str::from_utf8(payload).ok()
}

/// JSON fallback for any serializable type outside the native kinds
pub fn encode_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let json = serde_json::to_value(value)?;
    Ok(encode(&TaggedValue::Json(json)))
}

pub fn decode_deserializable<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    match decode(bytes, ValueKind::Json)? {
        TaggedValue::Json(v) => serde_json::from_value(v).ok(),
        _ => None,
    }
}

/// Rust types with a native codec representation
pub trait Storable: Sized {
    const KIND: ValueKind;

    fn to_tagged(&self) -> Result<TaggedValue, CodecError>;

    fn from_tagged(value: TaggedValue) -> Option<Self>;

    fn encode_value(&self) -> Result<Vec<u8>, CodecError> {
        Ok(encode(&self.to_tagged()?))
    }

    fn decode_value(bytes: &[u8]) -> Option<Self> {
        decode(bytes, Self::KIND).and_then(Self::from_tagged)
    }
}

macro_rules! impl_storable {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Storable for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn to_tagged(&self) -> Result<TaggedValue, CodecError> {
                Ok(TaggedValue::$variant(self.clone()))
            }

            fn from_tagged(value: TaggedValue) -> Option<Self> {
                match value {
                    TaggedValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_storable!(String, String, String);
impl_storable!(Vec<u8>, Bytes, Bytes);
impl_storable!(i64, Int, Int);
impl_storable!(f64, Double, Double);
impl_storable!(bool, Bool, Bool);
impl_storable!(DateTime<Utc>, Date, Date);
impl_storable!(serde_json::Value, Json, Json);

impl Storable for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn to_tagged(&self) -> Result<TaggedValue, CodecError> {
        Ok(TaggedValue::Int(*self as i64))
    }

    fn from_tagged(value: TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::Int(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }
}

/// Wrapper routing any serde type through the JSON fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T> Storable for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    const KIND: ValueKind = ValueKind::Json;

    fn to_tagged(&self) -> Result<TaggedValue, CodecError> {
        Ok(TaggedValue::Json(serde_json::to_value(&self.0)?))
    }

    fn from_tagged(value: TaggedValue) -> Option<Self> {
        match value {
            TaggedValue::Json(v) => serde_json::from_value(v).ok().map(Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn round_trip(value: TaggedValue) {
        let encoded = encode(&value);
        assert_eq!(decode(&encoded, value.kind()), Some(value));
    }

    #[test]
    fn test_round_trip_every_kind() {
        round_trip(TaggedValue::String("héllo wörld".to_string()));
        round_trip(TaggedValue::String(String::new()));
        round_trip(TaggedValue::Bytes(vec![0, 1, 2, 254, 255]));
        round_trip(TaggedValue::Bytes(vec![]));
        round_trip(TaggedValue::Int(i64::MIN));
        round_trip(TaggedValue::Int(42));
        round_trip(TaggedValue::Double(0.1 + 0.2));
        round_trip(TaggedValue::Double(-1.5e300));
        round_trip(TaggedValue::Bool(true));
        round_trip(TaggedValue::Bool(false));
        round_trip(TaggedValue::Date(
            Utc.with_ymd_and_hms(2023, 11, 5, 8, 15, 30).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        ));
        round_trip(TaggedValue::Json(json!({"a": [1, 2, {"b": null}]})));
    }

    #[test]
    fn test_tag_mismatch_is_absent() {
        let encoded = encode(&TaggedValue::Int(42));
        assert_eq!(decode(&encoded, ValueKind::String), None);
        assert_eq!(decode(&encoded, ValueKind::Double), None);
        assert_eq!(String::decode_value(&encoded), None);
        assert_eq!(i64::decode_value(&encoded), Some(42));
    }

    #[test]
    fn test_layout_is_tag_then_payload() {
        assert_eq!(encode(&TaggedValue::Int(-7)), b"INT:-7".to_vec());
        assert_eq!(encode(&TaggedValue::Bool(true)), b"BOO:true".to_vec());
        assert_eq!(encode(&TaggedValue::Bytes(b"hi".to_vec())), b"BIN:aGk=".to_vec());
        assert_eq!(ValueKind::of_encoded(b"DBL:1.5"), Some(ValueKind::Double));
        assert_eq!(ValueKind::of_encoded(b"XX"), None);
    }

    #[test]
    fn test_malformed_payloads_are_absent() {
        assert_eq!(decode(b"INT:abc", ValueKind::Int), None);
        assert_eq!(decode(b"BOO:yes", ValueKind::Bool), None);
        assert_eq!(decode(b"BIN:***", ValueKind::Bytes), None);
        assert_eq!(decode(b"DAT:yesterday", ValueKind::Date), None);
        assert_eq!(decode(b"IN", ValueKind::Int), None);
        assert_eq!(decode(b"", ValueKind::String), None);
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Session {
        user: String,
        scopes: Vec<String>,
        expires: Option<i64>,
    }

    #[test]
    fn test_json_fallback_for_serializable_types() {
        let session = Session {
            user: "ana".into(),
            scopes: vec!["read".into(), "write".into()],
            expires: None,
        };

        let encoded = encode_serializable(&session).unwrap();
        assert!(encoded.starts_with(b"JSN:"));
        assert_eq!(decode_deserializable::<Session>(&encoded), Some(session.clone()));

        let wrapped = Json(session.clone()).encode_value().unwrap();
        assert_eq!(Json::<Session>::decode_value(&wrapped), Some(Json(session)));
    }

    #[test]
    fn test_json_fallback_reports_unserializable_values() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "non-string keys are rejected by serde_json");
        assert!(matches!(encode_serializable(&map), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_i32_rejects_out_of_range() {
        let encoded = encode(&TaggedValue::Int(i64::MAX));
        assert_eq!(i32::decode_value(&encoded), None);
        assert_eq!(7i32.encode_value().unwrap(), b"INT:7".to_vec());
    }
}
