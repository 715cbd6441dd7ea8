//! Testing utilities for validators and models
//!
//! Assertion macros for validation outcomes, and (with the `proptest`
//! feature) an [`Arbitrary`](proptest::arbitrary::Arbitrary) implementation
//! for [`ValidationData`](crate::ValidationData).
//!
//! # Examples
//!
//! ```rust
//! use weir::validators::{count, email};
//! use weir::{assert_invalid, assert_reason, assert_valid, ValidationData};
//!
//! assert_valid!(count(5..=10), ValidationData::from("Tanner"));
//!
//! let err = assert_invalid!(email(), ValidationData::from("tanner@@vapor.codes"));
//! assert!(err.children().is_empty());
//!
//! assert_reason!(count(5..), ValidationData::from("Al"), "data is not at least 5 characters");
//! ```

/// Assert that validation passes.
///
/// Takes either a validator and an input, or a `Result` from a model run.
///
/// ```rust
/// use weir::validators::range;
/// use weir::{assert_valid, ValidationData};
///
/// assert_valid!(range(18..), ValidationData::Int(23));
/// assert_valid!(range(18..).validate_value(&30_u8));
/// ```
#[macro_export]
macro_rules! assert_valid {
    ($validator:expr, $input:expr) => {
        match ($validator).validate(&$input) {
            Ok(()) => {}
            Err(e) => panic!("Expected valid, got: {}", e),
        }
    };
    ($result:expr) => {
        match $result {
            Ok(()) => {}
            Err(e) => panic!("Expected valid, got: {}", e),
        }
    };
}

/// Assert that validation fails, and return the error.
///
/// ```rust
/// use weir::validators::nil;
/// use weir::{assert_invalid, ValidationData};
///
/// let err = assert_invalid!(nil(), ValidationData::from("x"));
/// assert_eq!(err.reason(), "data is not nil");
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($validator:expr, $input:expr) => {
        match ($validator).validate(&$input) {
            Ok(()) => panic!("Expected invalid, got valid for {:?}", $input),
            Err(e) => e,
        }
    };
    ($result:expr) => {
        match $result {
            Ok(()) => panic!("Expected invalid, got valid"),
            Err(e) => e,
        }
    };
}

/// Assert that validation fails with exactly the given reason.
///
/// ```rust
/// use weir::validators::{email, nil};
/// use weir::{assert_reason, ValidationData};
///
/// assert_reason!(
///     nil() | email(),
///     ValidationData::from("bad"),
///     "data is not nil and data is not a valid email address"
/// );
/// ```
#[macro_export]
macro_rules! assert_reason {
    ($validator:expr, $input:expr, $expected:expr) => {{
        let error = $crate::assert_invalid!($validator, $input);
        assert_eq!(error.to_string(), $expected);
    }};
    ($result:expr, $expected:expr) => {{
        let error = $crate::assert_invalid!($result);
        assert_eq!(error.to_string(), $expected);
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::ValidationData {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use crate::ValidationData;
        use chrono::DateTime;
        use proptest::collection::{btree_map, vec};

        let leaf = prop_oneof![
            any::<String>().prop_map(ValidationData::String),
            any::<i64>().prop_map(ValidationData::Int),
            any::<u64>().prop_map(ValidationData::UInt),
            any::<bool>().prop_map(ValidationData::Bool),
            vec(any::<u8>(), 0..16).prop_map(|b| ValidationData::Bytes(b.into())),
            (0_i64..4_102_444_800).prop_map(|secs| {
                DateTime::from_timestamp(secs, 0).map_or(ValidationData::Null, ValidationData::Date)
            }),
            (-1e12_f64..1e12).prop_map(ValidationData::Double),
            Just(ValidationData::Null),
        ];

        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(ValidationData::Array),
                btree_map("[a-z]{1,6}", inner, 0..4).prop_map(ValidationData::Map),
            ]
        })
        .boxed()
    }
}
