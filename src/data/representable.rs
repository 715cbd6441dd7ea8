//! Conversion of host values into [`ValidationData`]

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};

use super::ValidationData;
use crate::error::ConversionError;

/// Capability of being represented as [`ValidationData`].
///
/// Primitive implementations never fail. Containers fail only when one of
/// their elements fails, and wide integers fail when the value does not fit
/// the 64-bit representation.
///
/// # Example
///
/// ```rust
/// use weir::{ConversionError, ValidationData, ValidationDataRepresentable};
///
/// struct Celsius(f64);
///
/// impl ValidationDataRepresentable for Celsius {
///     fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
///         Ok(ValidationData::Double(self.0))
///     }
/// }
///
/// assert_eq!(
///     Celsius(21.5).make_validation_data().unwrap(),
///     ValidationData::Double(21.5)
/// );
/// ```
pub trait ValidationDataRepresentable {
    /// Convert this value to validation data.
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError>;
}

impl<T: ValidationDataRepresentable + ?Sized> ValidationDataRepresentable for &T {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        (**self).make_validation_data()
    }
}

impl<T: ValidationDataRepresentable + ?Sized> ValidationDataRepresentable for Box<T> {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        (**self).make_validation_data()
    }
}

impl ValidationDataRepresentable for ValidationData {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(self.clone())
    }
}

impl ValidationDataRepresentable for str {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::String(self.to_string()))
    }
}

impl ValidationDataRepresentable for String {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::String(self.clone()))
    }
}

impl ValidationDataRepresentable for bool {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Bool(*self))
    }
}

impl ValidationDataRepresentable for f64 {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Double(*self))
    }
}

impl ValidationDataRepresentable for f32 {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Double(f64::from(*self)))
    }
}

// Lossless widening into the 64-bit variants.
macro_rules! impl_representable_exact {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl ValidationDataRepresentable for $t {
                #[inline]
                fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
                    Ok(ValidationData::$variant(<$wide>::from(*self)))
                }
            }
        )+
    };
}

// Types that may not fit in 64 bits.
macro_rules! impl_representable_checked {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl ValidationDataRepresentable for $t {
                fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
                    <$wide>::try_from(*self)
                        .map(ValidationData::$variant)
                        .map_err(|_| ConversionError::OutOfRange {
                            type_name: stringify!($t),
                            value: self.to_string(),
                            target: stringify!($wide),
                        })
                }
            }
        )+
    };
}

impl_representable_exact!(Int, i64, i8, i16, i32, i64);
impl_representable_exact!(UInt, u64, u8, u16, u32, u64);
impl_representable_checked!(Int, i64, i128, isize);
impl_representable_checked!(UInt, u64, u128, usize);

impl ValidationDataRepresentable for Bytes {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Bytes(self.clone()))
    }
}

impl ValidationDataRepresentable for DateTime<Utc> {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Date(*self))
    }
}

/// Naive date-times are interpreted as UTC.
impl ValidationDataRepresentable for NaiveDateTime {
    #[inline]
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::Date(self.and_utc()))
    }
}

impl<T: ValidationDataRepresentable> ValidationDataRepresentable for Option<T> {
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        match self {
            None => Ok(ValidationData::Null),
            Some(value) => value.make_validation_data(),
        }
    }
}

fn convert_elements<'a, T, I>(items: I) -> Result<ValidationData, ConversionError>
where
    T: ValidationDataRepresentable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.make_validation_data()
                .map_err(|source| ConversionError::element(index.to_string(), source))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ValidationData::Array)
}

impl<T: ValidationDataRepresentable> ValidationDataRepresentable for [T] {
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        convert_elements(self)
    }
}

impl<T: ValidationDataRepresentable, const N: usize> ValidationDataRepresentable for [T; N] {
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        convert_elements(self)
    }
}

impl<T: ValidationDataRepresentable> ValidationDataRepresentable for Vec<T> {
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        convert_elements(self)
    }
}

fn convert_entries<'a, K, V, I>(entries: I) -> Result<ValidationData, ConversionError>
where
    K: AsRef<str> + 'a,
    V: ValidationDataRepresentable + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref();
            value
                .make_validation_data()
                .map(|data| (key.to_string(), data))
                .map_err(|source| ConversionError::element(key, source))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(ValidationData::Map)
}

impl<K, V, S> ValidationDataRepresentable for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: ValidationDataRepresentable,
{
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        convert_entries(self)
    }
}

impl<K, V> ValidationDataRepresentable for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: ValidationDataRepresentable,
{
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        convert_entries(self)
    }
}

impl ValidationDataRepresentable for serde_json::Value {
    fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
        Ok(ValidationData::from(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Unconvertible;

    impl ValidationDataRepresentable for Unconvertible {
        fn make_validation_data(&self) -> Result<ValidationData, ConversionError> {
            Err(ConversionError::custom("`Unconvertible` has no data form"))
        }
    }

    #[test]
    fn test_primitives_round_trip() {
        assert_eq!("hi".make_validation_data().unwrap().as_str(), Some("hi"));
        assert_eq!(
            String::from("hi").make_validation_data().unwrap().as_str(),
            Some("hi")
        );
        assert_eq!(true.make_validation_data().unwrap().as_bool(), Some(true));
        assert_eq!((-7_i8).make_validation_data().unwrap().as_int(), Some(-7));
        assert_eq!(7_u16.make_validation_data().unwrap().as_uint(), Some(7));
        assert_eq!(2.5_f64.make_validation_data().unwrap().as_double(), Some(2.5));

        let date = Utc.with_ymd_and_hms(2018, 7, 19, 0, 0, 0).unwrap();
        assert_eq!(date.make_validation_data().unwrap().as_date(), Some(&date));
        assert_eq!(
            date.naive_utc().make_validation_data().unwrap().as_date(),
            Some(&date)
        );

        let blob = Bytes::from_static(&[0, 1, 2]);
        assert_eq!(blob.make_validation_data().unwrap().as_bytes(), Some(&blob));
    }

    #[test]
    fn test_wide_integers_in_range() {
        assert_eq!(
            42_i128.make_validation_data().unwrap(),
            ValidationData::Int(42)
        );
        assert_eq!(
            42_usize.make_validation_data().unwrap(),
            ValidationData::UInt(42)
        );
    }

    #[test]
    fn test_wide_integers_out_of_range() {
        let err = u128::MAX.make_validation_data().unwrap_err();
        assert!(matches!(
            err,
            ConversionError::OutOfRange {
                type_name: "u128",
                target: "u64",
                ..
            }
        ));
        assert!(err.to_string().contains("cannot be represented as `u64`"));

        assert!(i128::MIN.make_validation_data().is_err());
    }

    #[test]
    fn test_option() {
        assert_eq!(
            None::<String>.make_validation_data().unwrap(),
            ValidationData::Null
        );
        assert_eq!(
            Some(5_i32).make_validation_data().unwrap(),
            ValidationData::Int(5)
        );
    }

    #[test]
    fn test_collections() {
        let data = vec![1_i32, 2, 3].make_validation_data().unwrap();
        assert_eq!(
            data,
            ValidationData::Array(vec![
                ValidationData::Int(1),
                ValidationData::Int(2),
                ValidationData::Int(3)
            ])
        );

        let mut map = HashMap::new();
        map.insert("a".to_string(), Some(1_u8));
        map.insert("b".to_string(), None);
        let data = map.make_validation_data().unwrap();
        let entries = data.as_map().unwrap();
        assert_eq!(entries["a"], ValidationData::UInt(1));
        assert_eq!(entries["b"], ValidationData::Null);
    }

    #[test]
    fn test_element_failure_propagates() {
        let err = vec![Unconvertible].make_validation_data().unwrap_err();
        match &err {
            ConversionError::Element { at, source } => {
                assert_eq!(at, "0");
                assert!(matches!(**source, ConversionError::Custom(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut map = BTreeMap::new();
        map.insert("pet", Unconvertible);
        let err = map.make_validation_data().unwrap_err();
        assert!(err.to_string().starts_with("element `pet`"));
    }
}
