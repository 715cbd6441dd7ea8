//! Serde support for validation data (feature-gated)
//!
//! `ValidationData` serializes to its natural shape: strings as strings,
//! numbers as numbers, arrays as sequences, maps as maps, `Null` as unit.
//! Dates serialize as RFC 3339 strings and byte blobs as bytes.
//!
//! Deserialization is the inverse except where the format loses the
//! distinction: dates come back as strings, and non-negative integers that
//! fit in `i64` come back as `Int`.
//!
//! # Example
//!
//! ```rust,ignore
//! use weir::ValidationData;
//!
//! let data: ValidationData = serde_json::from_str(r#"{"age": 23}"#).unwrap();
//! assert_eq!(data.as_map().unwrap()["age"], ValidationData::Int(23));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::ValidationData;

impl Serialize for ValidationData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationData::String(s) => serializer.serialize_str(s),
            ValidationData::Int(v) => serializer.serialize_i64(*v),
            ValidationData::UInt(v) => serializer.serialize_u64(*v),
            ValidationData::Bool(v) => serializer.serialize_bool(*v),
            ValidationData::Bytes(b) => serializer.serialize_bytes(b),
            ValidationData::Date(d) => serializer.collect_str(&d.to_rfc3339()),
            ValidationData::Double(v) => serializer.serialize_f64(*v),
            ValidationData::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ValidationData::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ValidationData::Null => serializer.serialize_unit(),
        }
    }
}

struct ValidationDataVisitor;

impl<'de> Visitor<'de> for ValidationDataVisitor {
    type Value = ValidationData;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value representable as validation data")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ValidationData::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ValidationData::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(ValidationData::UInt(v), ValidationData::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ValidationData::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ValidationData::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ValidationData::String(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(ValidationData::Bytes(Bytes::copy_from_slice(v)))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(ValidationData::Bytes(Bytes::from(v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ValidationData::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ValidationData::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        ValidationData::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ValidationData::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, ValidationData>()? {
            entries.insert(key, value);
        }
        Ok(ValidationData::Map(entries))
    }
}

impl<'de> Deserialize<'de> for ValidationData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValidationDataVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_serialize_natural_shape() {
        let mut entries = BTreeMap::new();
        entries.insert("name".to_string(), ValidationData::from("Tanner"));
        entries.insert("age".to_string(), ValidationData::Int(23));
        entries.insert("email".to_string(), ValidationData::Null);
        let data = ValidationData::Map(entries);

        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"age":23,"email":null,"name":"Tanner"}"#);
    }

    #[test]
    fn test_serialize_date_as_rfc3339() {
        let date = Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_string(&ValidationData::Date(date)).unwrap();
        assert_eq!(json, r#""2020-05-01T12:00:00+00:00""#);
    }

    #[test]
    fn test_deserialize() {
        let data: ValidationData =
            serde_json::from_str(r#"{"tags":["a",1,-2,2.5,true,null]}"#).unwrap();
        assert_eq!(
            data.as_map().unwrap()["tags"],
            ValidationData::Array(vec![
                ValidationData::from("a"),
                ValidationData::Int(1),
                ValidationData::Int(-2),
                ValidationData::Double(2.5),
                ValidationData::Bool(true),
                ValidationData::Null,
            ])
        );
    }

    #[test]
    fn test_deserialize_large_unsigned() {
        let data: ValidationData = serde_json::from_str(&u64::MAX.to_string()).unwrap();
        assert_eq!(data, ValidationData::UInt(u64::MAX));
    }

    #[test]
    fn test_round_trip() {
        let data = ValidationData::Array(vec![
            ValidationData::from("x"),
            ValidationData::Int(-1),
            ValidationData::Null,
        ]);
        let json = serde_json::to_string(&data).unwrap();
        let back: ValidationData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
