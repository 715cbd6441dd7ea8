//! The uniform value model validators inspect
//!
//! Every value a data-level validator sees is a [`ValidationData`]: a closed
//! tagged union over the shapes a host record can contain. Host types opt in
//! through [`ValidationDataRepresentable`], which converts a value into its
//! data form.
//!
//! # Example
//!
//! ```rust
//! use weir::{ValidationData, ValidationDataRepresentable};
//!
//! let name = "Tanner".make_validation_data().unwrap();
//! assert_eq!(name.as_str(), Some("Tanner"));
//!
//! let missing: Option<i32> = None;
//! assert!(missing.make_validation_data().unwrap().is_null());
//!
//! let tags = vec!["a", "b"].make_validation_data().unwrap();
//! assert_eq!(tags.len(), Some(2));
//! ```

mod representable;
#[cfg(feature = "serde")]
mod serde_impl;

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

pub use representable::ValidationDataRepresentable;

/// A value in the shape validators understand.
///
/// Exactly one variant is active. [`ValidationData::Null`] stands for an
/// absent value and is distinct from an empty string or an empty array.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValidationData {
    /// UTF-8 text.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Boolean.
    Bool(bool),
    /// Raw byte blob.
    Bytes(Bytes),
    /// Point in time, in UTC.
    Date(DateTime<Utc>),
    /// Floating-point number.
    Double(f64),
    /// Ordered list of values.
    Array(Vec<ValidationData>),
    /// String-keyed map of values.
    Map(BTreeMap<String, ValidationData>),
    /// Absent value.
    #[default]
    Null,
}

impl ValidationData {
    /// Short name of the active variant, used in error messages.
    ///
    /// ```rust
    /// use weir::ValidationData;
    ///
    /// assert_eq!(ValidationData::from("x").kind(), "string");
    /// assert_eq!(ValidationData::Null.kind(), "null");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationData::String(_) => "string",
            ValidationData::Int(_) => "integer",
            ValidationData::UInt(_) => "unsigned integer",
            ValidationData::Bool(_) => "boolean",
            ValidationData::Bytes(_) => "byte blob",
            ValidationData::Date(_) => "date",
            ValidationData::Double(_) => "double",
            ValidationData::Array(_) => "array",
            ValidationData::Map(_) => "map",
            ValidationData::Null => "null",
        }
    }

    /// Returns `true` for [`ValidationData::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ValidationData::Null)
    }

    /// The string payload, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValidationData::String(s) => Some(s),
            _ => None,
        }
    }

    /// The signed integer payload, if this is an `Int`.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ValidationData::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The unsigned integer payload, if this is a `UInt`.
    #[inline]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ValidationData::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValidationData::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The byte payload, if this is a `Bytes`.
    #[inline]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ValidationData::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// The date payload, if this is a `Date`.
    #[inline]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            ValidationData::Date(v) => Some(v),
            _ => None,
        }
    }

    /// The floating-point payload, if this is a `Double`.
    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ValidationData::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    #[inline]
    pub fn as_array(&self) -> Option<&[ValidationData]> {
        match self {
            ValidationData::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The entries, if this is a `Map`.
    #[inline]
    pub fn as_map(&self) -> Option<&BTreeMap<String, ValidationData>> {
        match self {
            ValidationData::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Number of elements for collection-shaped data.
    ///
    /// Strings count characters, not bytes. Scalars and `Null` return `None`.
    ///
    /// ```rust
    /// use weir::ValidationData;
    ///
    /// assert_eq!(ValidationData::from("héllo").len(), Some(5));
    /// assert_eq!(ValidationData::Int(3).len(), None);
    /// ```
    pub fn len(&self) -> Option<usize> {
        match self {
            ValidationData::String(s) => Some(s.chars().count()),
            ValidationData::Bytes(b) => Some(b.len()),
            ValidationData::Array(items) => Some(items.len()),
            ValidationData::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// `Some(true)` when a collection-shaped value has no elements.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}

impl fmt::Display for ValidationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationData::String(s) => write!(f, "{}", s),
            ValidationData::Int(v) => write!(f, "{}", v),
            ValidationData::UInt(v) => write!(f, "{}", v),
            ValidationData::Bool(v) => write!(f, "{}", v),
            ValidationData::Bytes(b) => write!(f, "{} bytes", b.len()),
            ValidationData::Date(d) => write!(f, "{}", d.to_rfc3339()),
            ValidationData::Double(v) => write!(f, "{}", v),
            ValidationData::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ValidationData::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            ValidationData::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ValidationData {
    fn from(value: &str) -> Self {
        ValidationData::String(value.to_string())
    }
}

impl From<String> for ValidationData {
    fn from(value: String) -> Self {
        ValidationData::String(value)
    }
}

impl From<bool> for ValidationData {
    fn from(value: bool) -> Self {
        ValidationData::Bool(value)
    }
}

impl From<f64> for ValidationData {
    fn from(value: f64) -> Self {
        ValidationData::Double(value)
    }
}

impl From<f32> for ValidationData {
    fn from(value: f32) -> Self {
        ValidationData::Double(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl From<$t> for ValidationData {
                fn from(value: $t) -> Self {
                    ValidationData::$variant(<$wide>::from(value))
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);

impl From<Bytes> for ValidationData {
    fn from(value: Bytes) -> Self {
        ValidationData::Bytes(value)
    }
}

impl From<DateTime<Utc>> for ValidationData {
    fn from(value: DateTime<Utc>) -> Self {
        ValidationData::Date(value)
    }
}

impl From<Vec<ValidationData>> for ValidationData {
    fn from(value: Vec<ValidationData>) -> Self {
        ValidationData::Array(value)
    }
}

impl From<BTreeMap<String, ValidationData>> for ValidationData {
    fn from(value: BTreeMap<String, ValidationData>) -> Self {
        ValidationData::Map(value)
    }
}

impl<T: Into<ValidationData>> From<Option<T>> for ValidationData {
    fn from(value: Option<T>) -> Self {
        value.map_or(ValidationData::Null, Into::into)
    }
}

/// JSON numbers become `Int` when they fit in `i64`, then `UInt`, then `Double`.
impl From<serde_json::Value> for ValidationData {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ValidationData::Null,
            Value::Bool(b) => ValidationData::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ValidationData::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ValidationData::UInt(u)
                } else {
                    ValidationData::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ValidationData::String(s),
            Value::Array(items) => {
                ValidationData::Array(items.into_iter().map(ValidationData::from).collect())
            }
            Value::Object(entries) => ValidationData::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, ValidationData::from(value)))
                    .collect(),
            ),
        }
    }
}
