//! # Weir
//!
//! Composable validators over a uniform data model.
//!
//! A [`Validator`] is a readable clause plus a check. Leaf validators live in
//! [`validators`]; [`combinators`] build AND/OR/NOT compositions (also the `&`,
//! `|` and `!` operators). [`Validations`] binds validators to the fields of a
//! model and reports every failing field at once, each under its own path.
//!
//! ## Quick Example
//!
//! ```rust
//! use weir::prelude::*;
//! use weir::validators::{alphanumeric, count, email, nil, range};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//!     email: Option<String>,
//! }
//!
//! impl Validatable for User {
//!     fn validations() -> Validations<Self> {
//!         Validations::new()
//!             .add("name", |u: &User| &u.name, count(5..) & alphanumeric())
//!             .add("age", |u: &User| &u.age, range(18..))
//!             .add("email", |u: &User| &u.email, nil() | email())
//!     }
//! }
//!
//! let user = User {
//!     name: "Tanner".to_string(),
//!     age: 23,
//!     email: Some("tanner@vapor.codes".to_string()),
//! };
//! assert!(user.validate().is_ok());
//!
//! let user = User {
//!     name: "Al".to_string(),
//!     age: 10,
//!     email: None,
//! };
//! match user.validate() {
//!     Err(Error::Invalid(err)) => assert_eq!(
//!         err.reason(),
//!         "`name` is not at least 5 characters, `age` is not at least 18"
//!     ),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```
//!
//! ## Features
//!
//! - `tracing`: debug events for failing fields and a span per [`validate`] call
//! - `serde`: `Serialize`/`Deserialize` for [`ValidationData`], `Serialize` for [`ValidationError`]
//! - `proptest`: `Arbitrary` for [`ValidationData`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod combinators;
pub mod data;
pub mod error;
pub mod testing;
pub mod validatable;
pub mod validations;
pub mod validator;
pub mod validators;

// Re-exports
pub use data::{ValidationData, ValidationDataRepresentable};
pub use error::{
    BasicValidationError, CompositeKind, CompositeValidationError, ConversionError, Error,
    ValidationError,
};
pub use validatable::{validate, Validatable};
pub use validations::{FieldPath, Validations};
pub use validator::Validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{ValidationData, ValidationDataRepresentable};
    pub use crate::error::{ConversionError, Error, ValidationError};
    pub use crate::validatable::{validate, Validatable};
    pub use crate::validations::{FieldPath, Validations};
    pub use crate::validator::Validator;
}
