//! Logical combinators over validators
//!
//! The three combinators differ in how much they evaluate:
//!
//! - [`and`] always evaluates both sides, so a failure reports every reason.
//! - [`or`] stops at the first side that passes; it is the only short-circuit.
//! - [`not`] inverts a validator and describes the condition that matched.
//!
//! Combinators never assign paths. The errors they build start with an empty
//! path and pick one up when a field binding prefixes them.
//!
//! # Example
//!
//! ```rust
//! use weir::combinators::{and, not};
//! use weir::validators::{alphanumeric, count, nil};
//! use weir::ValidationData;
//!
//! let username = and(count(5..), alphanumeric());
//! assert_eq!(username.readable(), "at least 5 characters and is in A-Z, a-z, 0-9");
//!
//! let err = username.validate(&ValidationData::from("a!")).unwrap_err();
//! assert_eq!(err.children().len(), 2);
//!
//! let present = not(nil());
//! assert_eq!(
//!     present.validate(&ValidationData::Null).unwrap_err().reason(),
//!     "data is nil"
//! );
//! ```

use crate::error::{CompositeKind, ValidationError};
use crate::validator::Validator;

/// Both validators must pass.
///
/// Both sides are evaluated even when the left one fails. The error holds
/// the failing sides in order; with both failing it renders
/// `"<left reason> and <right reason>"`.
///
/// Readable clause: `"<lhs> and is <rhs>"`.
pub fn and<T: ?Sized + 'static>(lhs: Validator<T>, rhs: Validator<T>) -> Validator<T> {
    let readable = format!("{} and is {}", lhs.readable(), rhs.readable());
    Validator::new(readable, move |input: &T| {
        let left = lhs.validate(input).err();
        let right = rhs.validate(input).err();
        let errors: Vec<ValidationError> = left.into_iter().chain(right).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::composite(CompositeKind::And, errors))
        }
    })
}

/// Either validator must pass.
///
/// The right side only runs when the left side fails. When both fail the
/// error renders `"<left reason> and <right reason>"`: neither condition held.
///
/// Readable clause: `"<lhs> or is <rhs>"`.
pub fn or<T: ?Sized + 'static>(lhs: Validator<T>, rhs: Validator<T>) -> Validator<T> {
    let readable = format!("{} or is {}", lhs.readable(), rhs.readable());
    Validator::new(readable, move |input: &T| {
        let left = match lhs.validate(input) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        match rhs.validate(input) {
            Ok(()) => Ok(()),
            Err(right) => Err(ValidationError::composite(
                CompositeKind::Or,
                vec![left, right],
            )),
        }
    })
}

/// The validator must fail.
///
/// When the inner validator passes, the error message is `"is <inner>"`.
///
/// Readable clause: `"not <inner>"`.
pub fn not<T: ?Sized + 'static>(inner: Validator<T>) -> Validator<T> {
    let readable = format!("not {}", inner.readable());
    let message = format!("is {}", inner.readable());
    Validator::new(readable, move |input: &T| match inner.validate(input) {
        Ok(()) => Err(ValidationError::basic(message.clone())),
        Err(_) => Ok(()),
    })
}

/// Every validator must pass; folds the list with [`and`].
///
/// An empty list accepts everything.
///
/// ```rust
/// use weir::combinators::all;
/// use weir::validators::{ascii, count};
/// use weir::ValidationData;
///
/// let v = all([count(1..=3), ascii()]);
/// assert!(v.is_valid(&ValidationData::from("abc")));
/// assert!(!v.is_valid(&ValidationData::from("abcd")));
/// ```
pub fn all<T, I>(validators: I) -> Validator<T>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = Validator<T>>,
{
    validators
        .into_iter()
        .reduce(and)
        .unwrap_or_else(|| Validator::new("valid", |_: &T| Ok(())))
}

/// At least one validator must pass; folds the list with [`or`].
///
/// An empty list rejects everything.
pub fn any<T, I>(validators: I) -> Validator<T>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = Validator<T>>,
{
    validators.into_iter().reduce(or).unwrap_or_else(|| {
        Validator::new("any of no alternatives", |_: &T| {
            Err(ValidationError::basic("matches no alternative"))
        })
    })
}
