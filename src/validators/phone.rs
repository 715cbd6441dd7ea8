//! Phone number layouts

use std::sync::LazyLock;

use regex::Regex;

use crate::validator::Validator;
use crate::validators::pattern::{anchored, matching};

const KIND: &str = "phone number";

/// Digit layout of a ten-digit phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneFormat {
    /// `5551234567`
    Plain,
    /// `555-123-4567`
    Dashed,
    /// `(555)123-4567`
    DashedWithParentheses,
}

static SIMPLE: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    PhoneFormat::ALL.map(|format| anchored(format.pattern()).expect("phone layout pattern"))
});

static COUNTRY_CODE: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    PhoneFormat::ALL.map(|format| {
        anchored(&format!("[0-9]{{1,4}} {}", format.pattern()))
            .expect("phone layout pattern")
    })
});

impl PhoneFormat {
    const ALL: [PhoneFormat; 3] = [
        PhoneFormat::Plain,
        PhoneFormat::Dashed,
        PhoneFormat::DashedWithParentheses,
    ];

    fn index(self) -> usize {
        match self {
            PhoneFormat::Plain => 0,
            PhoneFormat::Dashed => 1,
            PhoneFormat::DashedWithParentheses => 2,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            PhoneFormat::Plain => r"[0-9]{3}[0-9]{3}[0-9]{4}",
            PhoneFormat::Dashed => r"[0-9]{3}-[0-9]{3}-[0-9]{4}",
            PhoneFormat::DashedWithParentheses => r"\([0-9]{3}\)[0-9]{3}-[0-9]{4}",
        }
    }
}

/// Which phone numbers [`phone`] accepts.
#[derive(Debug, Clone)]
pub enum PhoneType {
    /// A 1-4 digit country code and a space before the number: `1 555-123-4567`.
    CountryCode(PhoneFormat),
    /// The number alone.
    Simple(PhoneFormat),
    /// A caller-supplied pattern, matched against the whole input.
    Custom(Regex),
}

impl PhoneType {
    /// A custom layout from a pattern; anchored to the whole input.
    ///
    /// ```rust
    /// use weir::validators::{phone, PhoneType};
    /// use weir::ValidationData;
    ///
    /// let uk = phone(PhoneType::custom(r"0[0-9]{4} [0-9]{6}").unwrap());
    /// assert!(uk.is_valid(&ValidationData::from("01632 960001")));
    /// assert!(!uk.is_valid(&ValidationData::from("x01632 960001")));
    /// ```
    pub fn custom(pattern: &str) -> Result<Self, regex::Error> {
        Ok(PhoneType::Custom(anchored(pattern)?))
    }

    fn regex(self) -> Regex {
        match self {
            PhoneType::CountryCode(format) => COUNTRY_CODE[format.index()].clone(),
            PhoneType::Simple(format) => SIMPLE[format.index()].clone(),
            PhoneType::Custom(regex) => regex,
        }
    }
}

/// A phone number in the given layout.
///
/// ```rust
/// use weir::validators::{phone, PhoneFormat, PhoneType};
/// use weir::ValidationData;
///
/// let v = phone(PhoneType::CountryCode(PhoneFormat::Dashed));
/// assert_eq!(v.readable(), "a valid phone number");
/// assert!(v.is_valid(&ValidationData::from("44 555-123-4567")));
/// assert!(!v.is_valid(&ValidationData::from("555-123-4567")));
/// ```
pub fn phone(kind: PhoneType) -> Validator {
    matching(KIND, kind.regex())
}

/// A phone number matching a custom pattern.
///
/// Shorthand for `phone(PhoneType::custom(pattern)?)`.
pub fn phone_custom(pattern: &str) -> Result<Validator, regex::Error> {
    Ok(phone(PhoneType::custom(pattern)?))
}
