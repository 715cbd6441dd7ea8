//! Validation errors with field paths
//!
//! A validation failure is data: a [`ValidationError`] carrying the path of the
//! invalid field and a message. Failures from combinators and from whole-model
//! runs nest as composites, and the displayable [`reason`](ValidationError::reason)
//! is rendered lazily by walking the tree.
//!
//! Paths are applied exactly once per level. A composite renders each child
//! with `composite path + child path` as the child's full path, so a child's
//! own path is never prefixed twice and never dropped.
//!
//! # Examples
//!
//! ```
//! use weir::ValidationError;
//!
//! let err = ValidationError::basic("is not a valid email address");
//! assert_eq!(err.reason(), "data is not a valid email address");
//!
//! let err = err.at(["user", "email"]);
//! assert_eq!(err.reason(), "`user.email` is not a valid email address");
//! ```
//!
//! Errors that are not about data validity (a field that cannot be read or
//! converted) are a separate kind, [`Error::Conversion`], and abort a run
//! instead of being aggregated.

use std::fmt;

use crate::validations::FieldPath;

/// A single failed check: a message and the path it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicValidationError {
    message: String,
    path: Vec<String>,
}

impl BasicValidationError {
    /// Create a leaf error with an empty path.
    pub fn new(message: impl Into<String>) -> Self {
        BasicValidationError {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// The failure message, without any path prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What produced a [`CompositeValidationError`]; decides how children are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// AND combinator: one or both sides failed.
    And,
    /// OR combinator: both sides failed.
    Or,
    /// Whole-model run: one child per failed field binding.
    Fields,
}

impl CompositeKind {
    fn separator(self) -> &'static str {
        match self {
            CompositeKind::And | CompositeKind::Or => " and ",
            CompositeKind::Fields => ", ",
        }
    }
}

/// Several failures reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeValidationError {
    kind: CompositeKind,
    errors: Vec<ValidationError>,
    path: Vec<String>,
}

impl CompositeValidationError {
    /// Create a composite with an empty path.
    pub fn new(kind: CompositeKind, errors: Vec<ValidationError>) -> Self {
        CompositeValidationError {
            kind,
            errors,
            path: Vec::new(),
        }
    }

    /// Which operation produced this composite.
    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    /// The child errors, in evaluation order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

/// A validation failure.
///
/// Either a [`BasicValidationError`] (one message) or a
/// [`CompositeValidationError`] (ordered children). Both carry a mutable path.
///
/// `Display` renders [`reason`](Self::reason).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A leaf failure.
    Basic(BasicValidationError),
    /// An aggregate of failures.
    Composite(CompositeValidationError),
}

impl ValidationError {
    /// Create a leaf error with an empty path.
    ///
    /// ```
    /// use weir::ValidationError;
    ///
    /// let err = ValidationError::basic("is not nil");
    /// assert!(err.path().is_empty());
    /// assert_eq!(err.to_string(), "data is not nil");
    /// ```
    pub fn basic(message: impl Into<String>) -> Self {
        ValidationError::Basic(BasicValidationError::new(message))
    }

    /// Create a composite error with an empty path.
    ///
    /// ```
    /// use weir::{CompositeKind, ValidationError};
    ///
    /// let err = ValidationError::composite(
    ///     CompositeKind::Fields,
    ///     vec![
    ///         ValidationError::basic("is too short").at("name"),
    ///         ValidationError::basic("is too young").at("age"),
    ///     ],
    /// );
    /// assert_eq!(err.reason(), "`name` is too short, `age` is too young");
    /// ```
    pub fn composite(kind: CompositeKind, errors: Vec<ValidationError>) -> Self {
        ValidationError::Composite(CompositeValidationError::new(kind, errors))
    }

    /// The path to the invalid data, relative to whoever holds this error.
    pub fn path(&self) -> &[String] {
        match self {
            ValidationError::Basic(e) => &e.path,
            ValidationError::Composite(e) => &e.path,
        }
    }

    /// Mutable access to the path.
    pub fn path_mut(&mut self) -> &mut Vec<String> {
        match self {
            ValidationError::Basic(e) => &mut e.path,
            ValidationError::Composite(e) => &mut e.path,
        }
    }

    /// Insert `prefix` in front of the current path.
    pub fn prepend_path(&mut self, prefix: &[String]) {
        if prefix.is_empty() {
            return;
        }
        let path = self.path_mut();
        let mut full = Vec::with_capacity(prefix.len() + path.len());
        full.extend_from_slice(prefix);
        full.append(path);
        *path = full;
    }

    /// Builder form of [`prepend_path`](Self::prepend_path).
    pub fn at(mut self, path: impl Into<FieldPath>) -> Self {
        let path = path.into();
        self.prepend_path(path.segments());
        self
    }

    /// The leaf message, or `None` for composites.
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationError::Basic(e) => Some(e.message()),
            ValidationError::Composite(_) => None,
        }
    }

    /// Child errors of a composite; empty for leaves.
    pub fn children(&self) -> &[ValidationError] {
        match self {
            ValidationError::Basic(_) => &[],
            ValidationError::Composite(e) => e.errors(),
        }
    }

    /// The composite kind, or `None` for leaves.
    pub fn composite_kind(&self) -> Option<CompositeKind> {
        match self {
            ValidationError::Basic(_) => None,
            ValidationError::Composite(e) => Some(e.kind()),
        }
    }

    /// Flatten the tree into `(full path, message)` pairs, in order.
    ///
    /// ```
    /// use weir::{CompositeKind, ValidationError};
    ///
    /// let err = ValidationError::composite(
    ///     CompositeKind::Fields,
    ///     vec![ValidationError::basic("is not nil").at("name")],
    /// )
    /// .at("user");
    ///
    /// let leaves = err.leaves();
    /// assert_eq!(leaves[0].0, vec!["user".to_string(), "name".to_string()]);
    /// assert_eq!(leaves[0].1, "is not nil");
    /// ```
    pub fn leaves(&self) -> Vec<(Vec<String>, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&[], &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &[String], out: &mut Vec<(Vec<String>, &'a str)>) {
        let full = join_paths(prefix, self.path());
        match self {
            ValidationError::Basic(e) => out.push((full, e.message())),
            ValidationError::Composite(e) => {
                for child in &e.errors {
                    child.collect_leaves(&full, out);
                }
            }
        }
    }

    /// Human-readable explanation, path-prefixed.
    ///
    /// Leaves render as `` `a.b` message `` (or `data message` when the path
    /// is empty). Composites join their children's reasons.
    pub fn reason(&self) -> String {
        self.render(&[])
    }

    fn render(&self, prefix: &[String]) -> String {
        let full = join_paths(prefix, self.path());
        match self {
            ValidationError::Basic(e) => {
                if full.is_empty() {
                    format!("data {}", e.message)
                } else {
                    format!("`{}` {}", full.join("."), e.message)
                }
            }
            ValidationError::Composite(e) => e
                .errors
                .iter()
                .map(|child| child.render(&full))
                .collect::<Vec<_>>()
                .join(e.kind.separator()),
        }
    }
}

fn join_paths(prefix: &[String], path: &[String]) -> Vec<String> {
    let mut full = Vec::with_capacity(prefix.len() + path.len());
    full.extend_from_slice(prefix);
    full.extend_from_slice(path);
    full
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl std::error::Error for ValidationError {}

impl From<BasicValidationError> for ValidationError {
    fn from(error: BasicValidationError) -> Self {
        ValidationError::Basic(error)
    }
}

impl From<CompositeValidationError> for ValidationError {
    fn from(error: CompositeValidationError) -> Self {
        ValidationError::Composite(error)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let children = self.children();
        let len = if children.is_empty() { 2 } else { 3 };
        let mut state = serializer.serialize_struct("ValidationError", len)?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("reason", &self.reason())?;
        if !children.is_empty() {
            state.serialize_field("errors", children)?;
        }
        state.end()
    }
}

/// Failure to turn a host value into [`ValidationData`](crate::ValidationData).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A numeric value does not fit the 64-bit representation.
    #[error("`{type_name}` value {value} cannot be represented as `{target}`")]
    OutOfRange {
        /// Source type.
        type_name: &'static str,
        /// The offending value.
        value: String,
        /// Target representation.
        target: &'static str,
    },
    /// An element inside an array or map failed to convert.
    #[error("element `{at}`: {source}")]
    Element {
        /// Index or key of the element.
        at: String,
        /// Why the element failed.
        #[source]
        source: Box<ConversionError>,
    },
    /// Conversion failure reported by a custom implementation.
    #[error("{0}")]
    Custom(String),
}

impl ConversionError {
    /// Wrap `source` with the index or key of the failing element.
    pub fn element(at: impl Into<String>, source: ConversionError) -> Self {
        ConversionError::Element {
            at: at.into(),
            source: Box::new(source),
        }
    }

    /// A free-form conversion failure.
    pub fn custom(message: impl Into<String>) -> Self {
        ConversionError::Custom(message.into())
    }
}

/// Outcome of validating a model: invalid data, or a run that could not finish.
///
/// `Invalid` is the aggregate of every field failure. `Conversion` means a
/// field could not be read as validation data; it stops the run at that field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The data failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A field could not be converted to validation data.
    #[error("could not read `{path}` for validation: {source}")]
    Conversion {
        /// Dotted path of the field.
        path: String,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },
}

impl Error {
    /// The validation error, if this is `Invalid`.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid(e) => Some(e),
            Error::Conversion { .. } => None,
        }
    }

    /// Consume and return the validation error, if this is `Invalid`.
    pub fn into_validation_error(self) -> Option<ValidationError> {
        match self {
            Error::Invalid(e) => Some(e),
            Error::Conversion { .. } => None,
        }
    }

    /// Returns `true` for `Invalid`.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }

    pub(crate) fn prepend_path(self, prefix: &FieldPath) -> Self {
        match self {
            Error::Invalid(mut e) => {
                e.prepend_path(prefix.segments());
                Error::Invalid(e)
            }
            Error::Conversion { path, source } => {
                let path = if prefix.is_empty() {
                    path
                } else if path.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{}.{}", prefix, path)
                };
                Error::Conversion { path, source }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(message: &str) -> ValidationError {
        ValidationError::basic(message)
    }

    #[test]
    fn test_leaf_reason_without_path() {
        assert_eq!(leaf("is not nil").reason(), "data is not nil");
    }

    #[test]
    fn test_leaf_reason_with_path() {
        let err = leaf("is not nil").at(["pet", "name"]);
        assert_eq!(err.path(), &["pet".to_string(), "name".to_string()]);
        assert_eq!(err.reason(), "`pet.name` is not nil");
    }

    #[test]
    fn test_prepend_path_order() {
        let mut err = leaf("is bad").at("name");
        err.prepend_path(&["pet".to_string()]);
        assert_eq!(err.path(), &["pet".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_composite_prefixes_children_once() {
        let err = ValidationError::composite(
            CompositeKind::And,
            vec![leaf("is too short"), leaf("is not alphanumeric")],
        )
        .at("name");

        assert_eq!(
            err.reason(),
            "`name` is too short and `name` is not alphanumeric"
        );
        // Rendering does not mutate the children.
        assert!(err.children()[0].path().is_empty());
        assert_eq!(err.reason(), err.to_string());
    }

    #[test]
    fn test_nested_composites_prefix_each_level_once() {
        let inner = ValidationError::composite(
            CompositeKind::Fields,
            vec![leaf("is too short").at("name")],
        )
        .at("pet");
        let outer = ValidationError::composite(CompositeKind::Fields, vec![inner]).at("user");

        assert_eq!(outer.reason(), "`user.pet.name` is too short");
        assert_eq!(
            outer.leaves()[0].0,
            vec!["user".to_string(), "pet".to_string(), "name".to_string()]
        );
    }

    #[test]
    fn test_single_child_renders_alone() {
        let err = ValidationError::composite(CompositeKind::And, vec![leaf("is not nil")]);
        assert_eq!(err.reason(), "data is not nil");
    }

    #[test]
    fn test_fields_join_with_comma() {
        let err = ValidationError::composite(
            CompositeKind::Fields,
            vec![leaf("a").at("x"), leaf("b").at("y")],
        );
        assert_eq!(err.reason(), "`x` a, `y` b");
        assert_eq!(err.composite_kind(), Some(CompositeKind::Fields));
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_error_conversion_path() {
        let err = Error::Conversion {
            path: "items".to_string(),
            source: ConversionError::custom("nope"),
        }
        .prepend_path(&FieldPath::from("order"));

        match &err {
            Error::Conversion { path, .. } => assert_eq!(path, "order.items"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_invalid());
        assert_eq!(
            err.to_string(),
            "could not read `order.items` for validation: nope"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_tree() {
        let err = ValidationError::composite(
            CompositeKind::Fields,
            vec![leaf("is not nil").at("email")],
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": [],
                "reason": "`email` is not nil",
                "errors": [
                    { "path": ["email"], "reason": "`email` is not nil" }
                ]
            })
        );
    }

    #[test]
    fn test_invalid_is_transparent() {
        let err = Error::from(leaf("is not nil").at("email"));
        assert_eq!(err.to_string(), "`email` is not nil");
        assert!(err.validation_error().is_some());
    }
}
