//! Pattern-based string leaves
//!
//! Every pattern is anchored to the whole input. Readable clauses take the
//! form `"a valid <kind>"` and failures `"is not a valid <kind>"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::ValidationData;
use crate::error::ValidationError;
use crate::validator::Validator;
use crate::validators::require_str;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("email pattern")
});

static HEXADECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]+$").expect("hexadecimal pattern"));

static MD5: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]{32}$").expect("MD5 pattern"));

static MONGO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]{24}$").expect("MongoID pattern"));

static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-f0-9]{2}(?:[:-]?[a-f0-9]{2}){5}|[a-f0-9]{4}(?:\.?[a-f0-9]{4}){2})$")
        .expect("MAC address pattern")
});

static BASE64: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$",
    )
    .expect("Base64 pattern")
});

static PRINTABLE_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ -~]+$").expect("printable ASCII pattern"));

static UUID: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    let versions = ["[1-5]", "1", "2", "3", "4", "5"];
    versions.map(|version| {
        Regex::new(&format!(
            "^[0-9a-fA-F]{{8}}-[0-9a-fA-F]{{4}}-{}[0-9a-fA-F]{{3}}-[89abAB][0-9a-fA-F]{{3}}-[0-9a-fA-F]{{12}}$",
            version
        ))
        .expect("UUID pattern")
    })
});

/// A string fully matching `regex`.
pub(crate) fn matching(kind: &str, regex: Regex) -> Validator {
    let readable = format!("a valid {}", kind);
    let message = format!("is not a valid {}", kind);
    Validator::new(readable.clone(), move |data: &ValidationData| {
        if regex.is_match(require_str(data, &readable)?) {
            Ok(())
        } else {
            Err(ValidationError::basic(message.clone()))
        }
    })
}

/// Compile `pattern` so that it must match the entire input.
pub(crate) fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

/// A string matching a custom pattern in full.
///
/// `kind` names what the pattern accepts and appears in messages.
///
/// ```rust
/// use weir::validators::pattern;
/// use weir::ValidationData;
///
/// let zip = pattern("ZIP code", r"[0-9]{5}").unwrap();
/// assert_eq!(zip.readable(), "a valid ZIP code");
/// assert!(zip.is_valid(&ValidationData::from("12345")));
/// assert!(!zip.is_valid(&ValidationData::from("123456")));
/// ```
pub fn pattern(kind: &str, pattern: &str) -> Result<Validator, regex::Error> {
    Ok(matching(kind, anchored(pattern)?))
}

/// An email address of the form `local@domain.tld`.
pub fn email() -> Validator {
    matching("email address", EMAIL.clone())
}

/// One or more hexadecimal digits.
pub fn hexadecimal() -> Validator {
    matching("hexadecimal number", HEXADECIMAL.clone())
}

/// 32 hexadecimal digits.
pub fn md5() -> Validator {
    matching("MD5 hash", MD5.clone())
}

/// 24 hexadecimal digits.
pub fn mongo_id() -> Validator {
    matching("MongoID", MONGO_ID.clone())
}

/// A MAC address: six pairs separated by `:`, `-` or nothing, or three
/// dotted quads (`7ab3.5f8d.f56e`).
pub fn mac_address() -> Validator {
    matching("MAC address", MAC_ADDRESS.clone())
}

/// Padded Base64; the empty string is rejected.
pub fn base64() -> Validator {
    matching("Base64 string", BASE64.clone())
}

/// One or more printable ASCII characters (space through `~`).
pub fn printable_ascii() -> Validator {
    matching("printable ASCII string", PRINTABLE_ASCII.clone())
}

/// Which UUID versions [`uuid`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UuidVersion {
    /// Versions 1 through 5.
    #[default]
    Any,
    /// Time-based.
    V1,
    /// DCE security.
    V2,
    /// MD5 name-based.
    V3,
    /// Random.
    V4,
    /// SHA-1 name-based.
    V5,
}

impl UuidVersion {
    fn index(self) -> usize {
        match self {
            UuidVersion::Any => 0,
            UuidVersion::V1 => 1,
            UuidVersion::V2 => 2,
            UuidVersion::V3 => 3,
            UuidVersion::V4 => 4,
            UuidVersion::V5 => 5,
        }
    }
}

/// A hyphenated UUID with the given version digit and an RFC 4122 variant.
///
/// ```rust
/// use weir::validators::{uuid, UuidVersion};
/// use weir::ValidationData;
///
/// let v4 = uuid(UuidVersion::V4);
/// assert_eq!(v4.readable(), "a valid UUIDv4");
/// assert!(v4.is_valid(&ValidationData::from("e18fb0d3-8c5e-4bc2-aad7-45dd87cc447b")));
/// assert!(!v4.is_valid(&ValidationData::from("6ad2f2d0-6a7e-11e7-97b2-0023dffdd425")));
/// ```
pub fn uuid(version: UuidVersion) -> Validator {
    let index = version.index();
    let kind = if index == 0 {
        "UUID".to_string()
    } else {
        format!("UUIDv{}", index)
    };
    matching(&kind, UUID[index].clone())
}

/// A password of at least `max(min_length, 3)` characters containing an
/// ASCII letter, a digit and a symbol (anything but letters, digits,
/// whitespace and `:`).
///
/// ```rust
/// use weir::validators::strong_password;
/// use weir::ValidationData;
///
/// let v = strong_password(8);
/// assert!(v.is_valid(&ValidationData::from("c0rrect-h0rse")));
/// assert_eq!(
///     v.validate(&ValidationData::from("password")).unwrap_err().reason(),
///     "data is not a strong password"
/// );
/// ```
pub fn strong_password(min_length: usize) -> Validator {
    let min_length = min_length.max(3);
    Validator::new("a strong password", move |data: &ValidationData| {
        let s = require_str(data, "a strong password")?;
        let long_enough = s.chars().count() >= min_length;
        let has_letter = s.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = s.chars().any(|c| c.is_ascii_digit());
        let has_symbol = s
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace() && c != ':');
        if long_enough && has_letter && has_digit && has_symbol {
            Ok(())
        } else {
            Err(ValidationError::basic("is not a strong password"))
        }
    })
}
