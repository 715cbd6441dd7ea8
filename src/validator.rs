//! The validator value type
//!
//! A [`Validator`] is a readable clause plus a check function. Leaf validators
//! are constructor functions in [`crate::validators`]; compound validators
//! come from the combinators in [`crate::combinators`], which are also
//! available as methods and as the `&`, `|` and `!` operators.
//!
//! # Example
//!
//! ```rust
//! use weir::validators::{count, email, nil};
//! use weir::ValidationData;
//!
//! let name = count(5..=10);
//! assert!(name.validate(&ValidationData::from("Tanner")).is_ok());
//!
//! let optional_email = nil() | email();
//! assert!(optional_email.validate(&ValidationData::Null).is_ok());
//! assert_eq!(optional_email.readable(), "nil or is a valid email address");
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::combinators;
use crate::data::{ValidationData, ValidationDataRepresentable};
use crate::error::{Error, ValidationError};

type Check<T> = dyn Fn(&T) -> Result<(), ValidationError> + Send + Sync;

/// A named check over values of type `T`.
///
/// The readable clause describes what "valid" means and reads naturally after
/// "is" or "is not" (`"between 5 and 10 characters"`, `"a valid email
/// address"`). The check returns a [`ValidationError`] with an empty path on
/// failure; paths are assigned by whoever binds the validator to a field.
///
/// Validators are immutable and cheap to clone. They are `Send + Sync`, so a
/// single instance can be shared across threads.
///
/// `T` defaults to [`ValidationData`], the input of every built-in leaf.
pub struct Validator<T: ?Sized = ValidationData> {
    readable: Arc<str>,
    check: Arc<Check<T>>,
}

impl<T: ?Sized> Validator<T> {
    /// Build a validator from a readable clause and a check function.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::{ValidationError, Validator};
    ///
    /// let even = Validator::<i64>::new("even", |n: &i64| {
    ///     if n % 2 == 0 {
    ///         Ok(())
    ///     } else {
    ///         Err(ValidationError::basic("is not even"))
    ///     }
    /// });
    ///
    /// assert!(even.validate(&4).is_ok());
    /// assert_eq!(even.validate(&3).unwrap_err().reason(), "data is not even");
    /// ```
    pub fn new<F>(readable: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Validator {
            readable: Arc::from(readable.into()),
            check: Arc::new(check),
        }
    }

    /// Build a validator from a boolean predicate; failures report `"is not <readable>"`.
    ///
    /// ```rust
    /// use weir::Validator;
    ///
    /// let positive = Validator::<i32>::from_predicate("positive", |n| *n > 0);
    /// assert_eq!(
    ///     positive.validate(&-1).unwrap_err().reason(),
    ///     "data is not positive"
    /// );
    /// ```
    pub fn from_predicate<F>(readable: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let readable = readable.into();
        let message = format!("is not {}", readable);
        Validator::new(readable, move |value: &T| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::basic(message.clone()))
            }
        })
    }

    /// The readable clause.
    pub fn readable(&self) -> &str {
        &self.readable
    }

    /// Run the check.
    #[inline]
    pub fn validate(&self, input: &T) -> Result<(), ValidationError> {
        (self.check)(input)
    }

    /// Returns `true` when `input` passes.
    #[inline]
    pub fn is_valid(&self, input: &T) -> bool {
        self.validate(input).is_ok()
    }
}

impl<T: ?Sized + 'static> Validator<T> {
    /// Combine with AND; see [`combinators::and`].
    pub fn and(self, rhs: Validator<T>) -> Validator<T> {
        combinators::and(self, rhs)
    }

    /// Combine with OR; see [`combinators::or`].
    pub fn or(self, rhs: Validator<T>) -> Validator<T> {
        combinators::or(self, rhs)
    }

    /// Negate; see [`combinators::not`].
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Validator<T> {
        combinators::not(self)
    }

    /// Validate a different type by projecting it to `T` first.
    ///
    /// ```rust
    /// use weir::Validator;
    ///
    /// let adult = Validator::<u32>::from_predicate("an adult", |age| *age >= 18);
    /// let by_len = adult.contramap(|s: &String| s.len() as u32);
    /// assert!(by_len.is_valid(&"x".repeat(20)));
    /// ```
    pub fn contramap<U, F>(self, project: F) -> Validator<U>
    where
        T: Sized,
        U: ?Sized,
        F: Fn(&U) -> T + Send + Sync + 'static,
    {
        let check = self.check;
        Validator {
            readable: self.readable,
            check: Arc::new(move |value: &U| check(&project(value))),
        }
    }
}

impl Validator<ValidationData> {
    /// Convert a host value and validate it.
    ///
    /// Conversion failures are reported as [`Error::Conversion`], validation
    /// failures as [`Error::Invalid`].
    ///
    /// ```rust
    /// use weir::validators::range;
    ///
    /// let adult = range(18..);
    /// assert!(adult.validate_value(&23_u8).is_ok());
    /// assert!(adult.validate_value(&Some(12_i32)).unwrap_err().is_invalid());
    /// ```
    pub fn validate_value<V>(&self, value: &V) -> Result<(), Error>
    where
        V: ValidationDataRepresentable + ?Sized,
    {
        let data = value
            .make_validation_data()
            .map_err(|source| Error::Conversion {
                path: String::new(),
                source,
            })?;
        self.validate(&data).map_err(Error::Invalid)
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Validator {
            readable: Arc::clone(&self.readable),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("readable", &self.readable)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> fmt::Display for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable)
    }
}

impl<T: ?Sized + 'static> BitAnd for Validator<T> {
    type Output = Validator<T>;

    fn bitand(self, rhs: Validator<T>) -> Validator<T> {
        combinators::and(self, rhs)
    }
}

impl<T: ?Sized + 'static> BitOr for Validator<T> {
    type Output = Validator<T>;

    fn bitor(self, rhs: Validator<T>) -> Validator<T> {
        combinators::or(self, rhs)
    }
}

impl<T: ?Sized + 'static> Not for Validator<T> {
    type Output = Validator<T>;

    fn not(self) -> Validator<T> {
        combinators::not(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;

    fn non_negative() -> Validator<i64> {
        Validator::from_predicate("non-negative", |n: &i64| *n >= 0)
    }

    #[test]
    fn test_new_and_validate() {
        let v = non_negative();
        assert_eq!(v.readable(), "non-negative");
        assert!(v.validate(&0).is_ok());
        assert!(v.is_valid(&10));

        let err = v.validate(&-1).unwrap_err();
        assert!(err.path().is_empty());
        assert_eq!(err.reason(), "data is not non-negative");
    }

    #[test]
    fn test_unsized_input() {
        let short = Validator::<str>::from_predicate("short", |s: &str| s.len() < 4);
        assert!(short.is_valid("abc"));
        assert!(!short.is_valid("abcd"));
    }

    #[test]
    fn test_clone_shares_check() {
        let v = non_negative();
        let w = v.clone();
        assert_eq!(v.readable(), w.readable());
        assert_eq!(v.is_valid(&-3), w.is_valid(&-3));
    }

    #[test]
    fn test_operators_match_methods() {
        let even = Validator::<i64>::from_predicate("even", |n: &i64| n % 2 == 0);

        let by_op = non_negative() & even.clone();
        let by_method = non_negative().and(even.clone());
        assert_eq!(by_op.readable(), by_method.readable());

        for n in [-3, -2, 0, 1, 4] {
            assert_eq!(by_op.is_valid(&n), by_method.is_valid(&n));
            assert_eq!((!even.clone()).is_valid(&n), even.clone().not().is_valid(&n));
        }
    }

    #[test]
    fn test_contramap_keeps_readable() {
        let v = non_negative().contramap(|s: &str| s.len() as i64 - 3);
        assert_eq!(v.readable(), "non-negative");
        assert!(v.is_valid("abc"));
        assert!(!v.is_valid("ab"));
    }

    #[test]
    fn test_validate_value_reports_conversion() {
        let v = Validator::new("anything", |_: &ValidationData| Ok(()));
        let err = v.validate_value(&u128::MAX).unwrap_err();
        assert!(matches!(
            err,
            Error::Conversion {
                source: ConversionError::OutOfRange { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_debug_and_display() {
        let v = non_negative();
        assert_eq!(v.to_string(), "non-negative");
        assert!(format!("{:?}", v).contains("non-negative"));
    }
}
