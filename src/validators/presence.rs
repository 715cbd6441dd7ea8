//! Absence, emptiness and presence

use crate::data::ValidationData;
use crate::error::ValidationError;
use crate::validator::Validator;

/// The value is `Null`.
///
/// Negate it to require a value:
///
/// ```rust
/// use weir::validators::nil;
/// use weir::ValidationData;
///
/// let present = !nil();
/// assert_eq!(present.readable(), "not nil");
/// assert!(present.is_valid(&ValidationData::from("")));
/// assert!(!present.is_valid(&ValidationData::Null));
/// ```
pub fn nil() -> Validator {
    Validator::new("nil", |data: &ValidationData| {
        if data.is_null() {
            Ok(())
        } else {
            Err(ValidationError::basic("is not nil"))
        }
    })
}

/// A string, byte blob, array or map with no elements.
///
/// ```rust
/// use weir::validators::empty;
/// use weir::ValidationData;
///
/// assert!(empty().is_valid(&ValidationData::Array(vec![])));
/// assert!(!empty().is_valid(&ValidationData::from("x")));
/// assert!(!empty().is_valid(&ValidationData::Null));
/// ```
pub fn empty() -> Validator {
    Validator::new("empty", |data: &ValidationData| match data.is_empty() {
        Some(true) => Ok(()),
        Some(false) => Err(ValidationError::basic("is not empty")),
        None => Err(ValidationError::basic(format!(
            "is not empty: {} values are not collections",
            data.kind()
        ))),
    })
}

/// Not `Null`, not an empty string and not an empty array.
///
/// Other values, including `0` and `false`, count as present.
///
/// ```rust
/// use weir::validators::required;
/// use weir::ValidationData;
///
/// let v = required();
/// assert!(v.is_valid(&ValidationData::Int(0)));
/// assert_eq!(
///     v.validate(&ValidationData::from("")).unwrap_err().reason(),
///     "data is not present: the value is an empty string"
/// );
/// ```
pub fn required() -> Validator {
    Validator::new("present", |data: &ValidationData| {
        let missing = match data {
            ValidationData::Null => "null",
            ValidationData::String(s) if s.is_empty() => "an empty string",
            ValidationData::Array(items) if items.is_empty() => "an empty array",
            _ => return Ok(()),
        };
        Err(ValidationError::basic(format!(
            "is not present: the value is {}",
            missing
        )))
    })
}
