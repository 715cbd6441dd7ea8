//! Models that know their own validations

use crate::error::Error;
use crate::validations::Validations;

/// A model type with a fixed set of validations.
///
/// # Example
///
/// ```rust
/// use weir::validators::{alphanumeric, count, range};
/// use weir::{Validatable, Validations};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Validatable for User {
///     fn validations() -> Validations<Self> {
///         Validations::new()
///             .add("name", |u: &User| &u.name, count(5..) & alphanumeric())
///             .add("age", |u: &User| &u.age, range(18..))
///     }
/// }
///
/// let user = User { name: "Tanner".into(), age: 23 };
/// assert!(user.validate().is_ok());
///
/// let user = User { name: "Al".into(), age: 10 };
/// let err = user.validate().unwrap_err();
/// assert!(err.to_string().contains("`name` is not at least 5 characters"));
/// assert!(err.to_string().contains("`age` is not at least 18"));
/// ```
pub trait Validatable: Sized + 'static {
    /// The checks for this type.
    fn validations() -> Validations<Self>;

    /// Run [`validations`](Self::validations) against `self`.
    fn validate(&self) -> Result<(), Error> {
        validate(self)
    }
}

/// Build the model's validations, run them, and report the aggregate.
pub fn validate<M: Validatable>(model: &M) -> Result<(), Error> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("validate", model = std::any::type_name::<M>()).entered();

    M::validations().run(model)
}
