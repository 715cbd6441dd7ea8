//! Field bindings and the per-model runner
//!
//! [`Validations`] is an ordered list of checks for one model type. Each
//! entry binds a validator to a field through an accessor function and a
//! [`FieldPath`] used in error messages.
//!
//! Running the list evaluates every entry, even after failures, and reports
//! all failures together as one composite error whose reason joins the
//! path-prefixed reasons with `", "`. A field that cannot be converted to
//! [`ValidationData`] stops the run with [`Error::Conversion`] instead.
//!
//! # Example
//!
//! ```rust
//! use weir::validators::{count, range};
//! use weir::Validations;
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let validations = Validations::<User>::new()
//!     .add("name", |u: &User| &u.name, count(5..))
//!     .add("age", |u: &User| &u.age, range(18..));
//!
//! let err = validations
//!     .run(&User { name: "Al".into(), age: 10 })
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "`name` is not at least 5 characters, `age` is not at least 18"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use crate::data::{ValidationData, ValidationDataRepresentable};
use crate::error::{CompositeKind, ConversionError, Error, ValidationError};
use crate::validatable::Validatable;
use crate::validator::Validator;

/// Readable location of a field: an ordered list of segments.
///
/// Converts from a dotted string (`"pet.name"`), an array or slice of
/// segments, or a `Vec`.
///
/// ```rust
/// use weir::FieldPath;
///
/// let path = FieldPath::from("pet.name");
/// assert_eq!(path.segments(), &["pet".to_string(), "name".to_string()]);
/// assert_eq!(path, FieldPath::from(["pet", "name"]));
/// assert_eq!(path.to_string(), "pet.name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The empty path, naming the model itself.
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path followed by `other`.
    pub fn join(&self, other: impl Into<FieldPath>) -> FieldPath {
        let mut segments = self.0.clone();
        segments.extend(other.into().0);
        FieldPath(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            return FieldPath::root();
        }
        FieldPath(path.split('.').map(str::to_string).collect())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::from(path.as_str())
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        FieldPath(segments)
    }
}

impl From<Vec<&str>> for FieldPath {
    fn from(segments: Vec<&str>) -> Self {
        FieldPath(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FieldPath {
    fn from(segments: &[&str]) -> Self {
        FieldPath(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        FieldPath(segments.iter().map(|s| s.to_string()).collect())
    }
}

type ModelCheck<M> = dyn Fn(&M) -> Result<(), Error> + Send + Sync;

struct FieldValidation<M> {
    path: FieldPath,
    readable: String,
    check: Arc<ModelCheck<M>>,
}

impl<M> Clone for FieldValidation<M> {
    fn clone(&self) -> Self {
        FieldValidation {
            path: self.path.clone(),
            readable: self.readable.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

/// The ordered checks for model type `M`.
///
/// Holds no per-instance state: build it once and run it against any number
/// of models, from any number of threads.
pub struct Validations<M> {
    entries: Vec<FieldValidation<M>>,
}

impl<M: 'static> Validations<M> {
    /// An empty set.
    pub fn new() -> Self {
        Validations {
            entries: Vec::new(),
        }
    }

    fn push_entry<F>(mut self, path: FieldPath, readable: String, check: F) -> Self
    where
        F: Fn(&M) -> Result<(), Error> + Send + Sync + 'static,
    {
        let readable = if path.is_empty() {
            readable
        } else {
            format!("{}: {}", path, readable)
        };
        self.entries.push(FieldValidation {
            path,
            readable,
            check: Arc::new(check),
        });
        self
    }

    /// Bind a data validator to a field.
    ///
    /// The accessor's result is converted with
    /// [`make_validation_data`](ValidationDataRepresentable::make_validation_data)
    /// before validating.
    pub fn add<F, A>(self, path: impl Into<FieldPath>, accessor: A, validator: Validator) -> Self
    where
        F: ValidationDataRepresentable + ?Sized,
        A: Fn(&M) -> &F + Send + Sync + 'static,
    {
        self.add_data(
            path,
            move |model: &M| accessor(model).make_validation_data(),
            validator,
        )
    }

    /// Bind a data validator to a field read by a fallible extractor.
    ///
    /// ```rust
    /// use weir::validators::email;
    /// use weir::{ConversionError, Error, ValidationData, Validations};
    ///
    /// let validations = Validations::<Vec<(String, String)>>::new().add_data(
    ///     "email",
    ///     |form: &Vec<(String, String)>| {
    ///         form.iter()
    ///             .find(|(key, _)| key == "email")
    ///             .map(|(_, value)| ValidationData::from(value.as_str()))
    ///             .ok_or_else(|| ConversionError::custom("missing form field"))
    ///     },
    ///     email(),
    /// );
    ///
    /// let err = validations.run(&vec![]).unwrap_err();
    /// assert!(matches!(err, Error::Conversion { ref path, .. } if path == "email"));
    /// ```
    pub fn add_data<A>(self, path: impl Into<FieldPath>, extract: A, validator: Validator) -> Self
    where
        A: Fn(&M) -> Result<ValidationData, ConversionError> + Send + Sync + 'static,
    {
        let readable = format!("is {}", validator.readable());
        self.push_entry(path.into(), readable, move |model: &M| {
            let data = extract(model).map_err(|source| Error::Conversion {
                path: String::new(),
                source,
            })?;
            validator.validate(&data).map_err(Error::Invalid)
        })
    }

    /// Bind a typed validator to a field, without conversion.
    ///
    /// ```rust
    /// use weir::validators::different_from;
    /// use weir::Validations;
    ///
    /// struct Account {
    ///     role: String,
    /// }
    ///
    /// let validations = Validations::<Account>::new()
    ///     .add_typed("role", |a: &Account| &a.role, different_from("root".to_string()));
    /// assert!(validations.run(&Account { role: "root".into() }).is_err());
    /// ```
    pub fn add_typed<F, A>(
        self,
        path: impl Into<FieldPath>,
        accessor: A,
        validator: Validator<F>,
    ) -> Self
    where
        F: ?Sized + 'static,
        A: Fn(&M) -> &F + Send + Sync + 'static,
    {
        let readable = format!("is {}", validator.readable());
        self.push_entry(path.into(), readable, move |model: &M| {
            validator.validate(accessor(model)).map_err(Error::Invalid)
        })
    }

    /// Bind a custom check to a field.
    ///
    /// `readable` is used as-is in [`Display`](fmt::Display) output.
    pub fn add_with<F, A, C>(
        self,
        path: impl Into<FieldPath>,
        readable: impl Into<String>,
        accessor: A,
        check: C,
    ) -> Self
    where
        F: ?Sized,
        A: Fn(&M) -> &F + Send + Sync + 'static,
        C: Fn(&F) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.push_entry(path.into(), readable.into(), move |model: &M| {
            check(accessor(model)).map_err(Error::Invalid)
        })
    }

    /// Add a check over the whole model, for rules spanning several fields.
    ///
    /// The check sets its own error paths.
    ///
    /// ```rust
    /// use weir::{ValidationError, Validations};
    ///
    /// struct Signup {
    ///     password: String,
    ///     confirmation: String,
    /// }
    ///
    /// let validations = Validations::<Signup>::new().add_model(
    ///     "password matches confirmation",
    ///     |s: &Signup| {
    ///         if s.password == s.confirmation {
    ///             Ok(())
    ///         } else {
    ///             Err(ValidationError::basic("does not match the password").at("confirmation"))
    ///         }
    ///     },
    /// );
    ///
    /// let signup = Signup { password: "a".into(), confirmation: "b".into() };
    /// assert_eq!(
    ///     validations.run(&signup).unwrap_err().to_string(),
    ///     "`confirmation` does not match the password"
    /// );
    /// ```
    pub fn add_model<C>(self, readable: impl Into<String>, check: C) -> Self
    where
        C: Fn(&M) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.push_entry(FieldPath::root(), readable.into(), move |model: &M| {
            check(model).map_err(Error::Invalid)
        })
    }

    /// Validate a nested model with its own [`Validatable`] rules.
    ///
    /// Failures inside the nested model are reported under `path`, so a
    /// failing `name` of a nested `pet` renders as `` `pet.name` ``.
    pub fn add_nested<N, A>(self, path: impl Into<FieldPath>, accessor: A) -> Self
    where
        N: Validatable,
        A: Fn(&M) -> &N + Send + Sync + 'static,
    {
        let nested = N::validations();
        self.push_entry(path.into(), "is valid".to_string(), move |model: &M| {
            nested.run(accessor(model))
        })
    }

    /// Append every entry of `other`.
    pub fn extend(mut self, other: Validations<M>) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

impl<M> Validations<M> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The readable description of each entry, in order.
    pub fn readables(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.readable.as_str())
    }

    /// Run every entry against `model`.
    ///
    /// Invalid fields are collected, with their binding path prepended, into
    /// one [`CompositeKind::Fields`] error. A conversion failure returns
    /// immediately.
    pub fn run(&self, model: &M) -> Result<(), Error> {
        let mut errors = Vec::new();

        for entry in &self.entries {
            match (entry.check)(model) {
                Ok(()) => {}
                Err(Error::Invalid(mut error)) => {
                    error.prepend_path(entry.path.segments());
                    #[cfg(feature = "tracing")]
                    tracing::debug!(field = %entry.path, reason = %error, "field failed validation");
                    errors.push(error);
                }
                Err(other) => {
                    let other = other.prepend_path(&entry.path);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(field = %entry.path, error = %other, "validation aborted");
                    return Err(other);
                }
            }
        }

        if errors.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            failed = errors.len(),
            checked = self.entries.len(),
            "model failed validation"
        );
        Err(Error::Invalid(ValidationError::composite(
            CompositeKind::Fields,
            errors,
        )))
    }
}

impl<M: 'static> Default for Validations<M> {
    fn default() -> Self {
        Validations::new()
    }
}

impl<M> Clone for Validations<M> {
    fn clone(&self) -> Self {
        Validations {
            entries: self.entries.clone(),
        }
    }
}

impl<M> fmt::Debug for Validations<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.readables()).finish()
    }
}

/// One line per entry: `"<path>: is <readable>"`.
impl<M> fmt::Display for Validations<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, readable) in self.readables().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(readable)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{count, email, nil, range};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct User {
        name: String,
        age: u32,
        email: Option<String>,
    }

    fn user(name: &str, age: u32, email: Option<&str>) -> User {
        User {
            name: name.to_string(),
            age,
            email: email.map(str::to_string),
        }
    }

    fn user_validations() -> Validations<User> {
        Validations::new()
            .add("name", |u: &User| &u.name, count(5..))
            .add("age", |u: &User| &u.age, range(18..))
            .add("email", |u: &User| &u.email, nil() | email())
    }

    #[test]
    fn test_field_path_from_dotted() {
        assert_eq!(FieldPath::from("").segments().len(), 0);
        assert_eq!(FieldPath::from("a.b.c").segments().len(), 3);
        assert_eq!(
            FieldPath::from("pet").join("name"),
            FieldPath::from(vec!["pet", "name"])
        );
    }

    #[test]
    fn test_valid_model() {
        let v = user_validations();
        assert!(v.run(&user("Tanner", 23, None)).is_ok());
        assert!(v.run(&user("Tanner", 23, Some("tanner@vapor.codes"))).is_ok());
    }

    #[test]
    fn test_collects_every_failure() {
        let v = user_validations();
        let err = v.run(&user("Al", 10, Some("bad"))).unwrap_err();
        let err = err.validation_error().unwrap();

        assert_eq!(err.composite_kind(), Some(CompositeKind::Fields));
        assert_eq!(err.children().len(), 3);
        assert_eq!(
            err.reason(),
            "`name` is not at least 5 characters, \
             `age` is not at least 18, \
             `email` is not nil and `email` is not a valid email address"
        );
    }

    #[test]
    fn test_never_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let v = Validations::<User>::new()
            .add("name", |u: &User| &u.name, count(100..))
            .add_with("age", "is counted", |u: &User| &u.age, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        assert!(v.run(&user("Tanner", 23, None)).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_conversion_failure_aborts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let v = Validations::<User>::new()
            .add_data(
                "score",
                |_: &User| Err(ConversionError::custom("no score")),
                range(0..),
            )
            .add_with("name", "is counted", |u: &User| u.name.as_str(), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        let err = v.run(&user("Tanner", 23, None)).unwrap_err();
        match err {
            Error::Conversion { path, source } => {
                assert_eq!(path, "score");
                assert_eq!(source, ConversionError::custom("no score"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_check_keeps_own_path() {
        let v = Validations::<User>::new().add_model("is consistent", |u: &User| {
            if u.age > 100 {
                Err(ValidationError::basic("is implausible").at("age"))
            } else {
                Ok(())
            }
        });
        let err = v.run(&user("Tanner", 120, None)).unwrap_err();
        assert_eq!(err.to_string(), "`age` is implausible");
    }

    #[test]
    fn test_display_lists_entries() {
        let v = user_validations().add_model("is consistent", |_: &User| Ok(()));
        assert_eq!(v.len(), 4);
        assert_eq!(
            v.to_string(),
            "name: is at least 5 characters\n\
             age: is at least 18\n\
             email: is nil or is a valid email address\n\
             is consistent"
        );
    }

    #[test]
    fn test_extend_and_clone() {
        let v = Validations::<User>::new()
            .add("name", |u: &User| &u.name, count(5..))
            .extend(Validations::new().add("age", |u: &User| &u.age, range(18..)));
        let w = v.clone();
        assert_eq!(w.len(), 2);
        assert!(!w.is_empty());
        assert!(Validations::<User>::default().is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let v = Arc::new(user_validations());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let v = Arc::clone(&v);
                std::thread::spawn(move || v.run(&user("Tanner", 18 + i, None)).is_ok())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn test_logs_failing_fields() {
            let _ = user_validations().run(&user("Al", 23, None));
            assert!(logs_contain("field failed validation"));
            assert!(logs_contain("model failed validation"));
        }

        #[traced_test]
        #[test]
        fn test_logs_conversion_abort() {
            let v = Validations::<User>::new().add_data(
                "score",
                |_: &User| Err(ConversionError::custom("no score")),
                range(0..),
            );
            let _ = v.run(&user("Tanner", 23, None));
            assert!(logs_contain("validation aborted"));
        }
    }
}
