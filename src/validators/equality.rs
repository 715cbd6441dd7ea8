//! Typed equality checks

use std::fmt::Debug;

use crate::error::ValidationError;
use crate::validator::Validator;

/// The input equals `expected`.
///
/// Unlike the other leaves this one is typed, so it binds with
/// [`Validations::add_typed`](crate::Validations::add_typed).
///
/// ```rust
/// use weir::validators::equal_to;
///
/// let v = equal_to(42);
/// assert_eq!(v.readable(), "equal to 42");
/// assert!(v.is_valid(&42));
/// assert_eq!(v.validate(&7).unwrap_err().reason(), "data is not equal to 42");
/// ```
pub fn equal_to<T>(expected: T) -> Validator<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    let readable = format!("equal to {:?}", expected);
    let message = format!("is not {}", readable);
    Validator::new(readable, move |input: &T| {
        if *input == expected {
            Ok(())
        } else {
            Err(ValidationError::basic(message.clone()))
        }
    })
}

/// The input differs from `unexpected`.
///
/// ```rust
/// use weir::validators::different_from;
///
/// let v = different_from("admin".to_string());
/// assert!(v.is_valid(&"tanner".to_string()));
/// assert!(!v.is_valid(&"admin".to_string()));
/// ```
pub fn different_from<T>(unexpected: T) -> Validator<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    let readable = format!("different from {:?}", unexpected);
    let message = format!("is not {}", readable);
    Validator::new(readable, move |input: &T| {
        if *input != unexpected {
            Ok(())
        } else {
            Err(ValidationError::basic(message.clone()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_to() {
        let v = equal_to("secret".to_string());
        assert_eq!(v.readable(), "equal to \"secret\"");
        assert!(v.is_valid(&"secret".to_string()));
        assert_eq!(
            v.validate(&"guess".to_string()).unwrap_err().reason(),
            "data is not equal to \"secret\""
        );
    }

    #[test]
    fn test_different_from() {
        let v = different_from(0_u32);
        assert!(v.is_valid(&1));
        assert_eq!(
            v.validate(&0).unwrap_err().reason(),
            "data is not different from 0"
        );
    }

    #[test]
    fn test_not_equal_is_different() {
        let not_equal = !equal_to(3_i64);
        let different = different_from(3_i64);
        for n in [2, 3, 4] {
            assert_eq!(not_equal.is_valid(&n), different.is_valid(&n));
        }
    }
}
