//! Allowed-character checks

use std::collections::BTreeSet;
use std::ops::Add;

use crate::data::ValidationData;
use crate::error::ValidationError;
use crate::validator::Validator;
use crate::validators::require_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Newlines,
    Whitespaces,
    Uppercase,
    Lowercase,
    Letters,
    DecimalDigits,
    Alphanumerics,
    Ascii,
}

impl CharClass {
    fn contains(self, c: char) -> bool {
        match self {
            CharClass::Newlines => is_newline(c),
            CharClass::Whitespaces => c.is_whitespace() && !is_newline(c),
            CharClass::Uppercase => c.is_uppercase(),
            CharClass::Lowercase => c.is_lowercase(),
            CharClass::Letters => c.is_alphabetic(),
            CharClass::DecimalDigits => c.is_ascii_digit(),
            CharClass::Alphanumerics => c.is_alphanumeric(),
            CharClass::Ascii => c.is_ascii(),
        }
    }
}

fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// A set of allowed characters: named classes plus explicit characters.
///
/// Sets combine with `+`:
///
/// ```rust
/// use weir::validators::{character_set, CharacterSet};
/// use weir::ValidationData;
///
/// let v = character_set(CharacterSet::alphanumerics() + CharacterSet::whitespaces());
/// assert_eq!(v.readable(), "in whitespace, A-Z, a-z, 0-9");
/// assert!(v.is_valid(&ValidationData::from("Tanner Nelson")));
/// assert!(!v.is_valid(&ValidationData::from("Tanner\nNelson")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet {
    classes: BTreeSet<CharClass>,
    chars: BTreeSet<char>,
}

impl CharacterSet {
    fn class(class: CharClass) -> Self {
        CharacterSet {
            classes: BTreeSet::from([class]),
            chars: BTreeSet::new(),
        }
    }

    /// Characters `0..128`.
    pub fn ascii() -> Self {
        Self::class(CharClass::Ascii)
    }

    /// Unicode letters and digits.
    pub fn alphanumerics() -> Self {
        Self::class(CharClass::Alphanumerics)
    }

    /// `0-9`.
    pub fn decimal_digits() -> Self {
        Self::class(CharClass::DecimalDigits)
    }

    /// Unicode letters.
    pub fn letters() -> Self {
        Self::class(CharClass::Letters)
    }

    /// Lowercase letters.
    pub fn lowercase_letters() -> Self {
        Self::class(CharClass::Lowercase)
    }

    /// Uppercase letters.
    pub fn uppercase_letters() -> Self {
        Self::class(CharClass::Uppercase)
    }

    /// Whitespace other than line breaks.
    pub fn whitespaces() -> Self {
        Self::class(CharClass::Whitespaces)
    }

    /// Line-break characters.
    pub fn newlines() -> Self {
        Self::class(CharClass::Newlines)
    }

    /// Exactly the given characters.
    ///
    /// ```rust
    /// use weir::validators::CharacterSet;
    ///
    /// let set = CharacterSet::chars("-_") + CharacterSet::decimal_digits();
    /// assert!(set.contains('_'));
    /// assert!(set.contains('7'));
    /// assert!(!set.contains('a'));
    /// ```
    pub fn chars(chars: &str) -> Self {
        chars.chars().collect()
    }

    /// Returns `true` if `c` is allowed.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c) || self.classes.iter().any(|class| class.contains(c))
    }

    /// Characters allowed by either set.
    pub fn union(mut self, other: CharacterSet) -> Self {
        self.classes.extend(other.classes);
        self.chars.extend(other.chars);
        self
    }

    /// Short descriptions of what the set covers, in a fixed order.
    pub fn traits(&self) -> Vec<String> {
        let has = |classes: &[CharClass]| classes.iter().any(|c| self.classes.contains(c));

        let mut traits = Vec::new();
        if has(&[CharClass::Newlines]) {
            traits.push("newlines".to_string());
        }
        if has(&[CharClass::Whitespaces]) {
            traits.push("whitespace".to_string());
        }
        if has(&[CharClass::Uppercase, CharClass::Letters, CharClass::Alphanumerics]) {
            traits.push("A-Z".to_string());
        }
        if has(&[CharClass::Lowercase, CharClass::Letters, CharClass::Alphanumerics]) {
            traits.push("a-z".to_string());
        }
        if has(&[CharClass::DecimalDigits, CharClass::Alphanumerics]) {
            traits.push("0-9".to_string());
        }
        if has(&[CharClass::Ascii]) {
            traits.push("ASCII".to_string());
        }
        traits.extend(self.chars.iter().map(|c| format!("'{}'", c.escape_default())));
        traits
    }

    fn readable(&self) -> String {
        let traits = self.traits();
        if traits.is_empty() {
            "in required character set".to_string()
        } else {
            format!("in {}", traits.join(", "))
        }
    }
}

impl Add for CharacterSet {
    type Output = CharacterSet;

    fn add(self, rhs: CharacterSet) -> CharacterSet {
        self.union(rhs)
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharacterSet {
            classes: BTreeSet::new(),
            chars: iter.into_iter().collect(),
        }
    }
}

/// Every character of the string is in `set`.
///
/// Fails on the first disallowed character, in string order.
///
/// ```rust
/// use weir::validators::{character_set, CharacterSet};
/// use weir::ValidationData;
///
/// let v = character_set(CharacterSet::decimal_digits());
/// let err = v.validate(&ValidationData::from("12a4b")).unwrap_err();
/// assert_eq!(
///     err.reason(),
///     "data contains an invalid character: 'a' (must be in 0-9)"
/// );
/// ```
pub fn character_set(set: CharacterSet) -> Validator {
    let readable = set.readable();
    let suffix = format!("(must be {})", readable);
    Validator::new(readable.clone(), move |data: &ValidationData| {
        let s = require_str(data, &readable)?;
        match s.chars().find(|c| !set.contains(*c)) {
            None => Ok(()),
            Some(c) => Err(ValidationError::basic(format!(
                "contains an invalid character: '{}' {}",
                c, suffix
            ))),
        }
    })
}

/// Only ASCII characters.
pub fn ascii() -> Validator {
    character_set(CharacterSet::ascii())
}

/// Only letters and digits.
pub fn alphanumeric() -> Validator {
    character_set(CharacterSet::alphanumerics())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> ValidationData {
        ValidationData::from(value)
    }

    #[test]
    fn test_ascii() {
        let v = ascii();
        assert_eq!(v.readable(), "in ASCII");
        assert!(v.is_valid(&s("ABCDEFGHIJKLMNOPQRSTUVWXYZ\n\t~")));
        assert!(v.is_valid(&s("")));
        let err = v.validate(&s("ABCDÐ")).unwrap_err();
        assert_eq!(
            err.reason(),
            "data contains an invalid character: 'Ð' (must be in ASCII)"
        );
    }

    #[test]
    fn test_alphanumeric() {
        let v = alphanumeric();
        assert_eq!(v.readable(), "in A-Z, a-z, 0-9");
        assert!(v.is_valid(&s("Tanner1")));
        assert!(v.is_valid(&s("ab")));
        assert!(!v.is_valid(&s("a!")));
        assert!(!v.is_valid(&s("Tanner Nelson")));
    }

    #[test]
    fn test_reports_first_invalid_character() {
        let v = alphanumeric();
        let err = v.validate(&s("ab-c d")).unwrap_err();
        assert!(err.reason().contains("'-'"));
        assert!(err.reason().contains(v.readable()));
    }

    #[test]
    fn test_union_traits_order() {
        let set = CharacterSet::decimal_digits()
            + CharacterSet::newlines()
            + CharacterSet::uppercase_letters()
            + CharacterSet::chars("_");
        assert_eq!(set.traits(), vec!["newlines", "A-Z", "0-9", "'_'"]);
    }

    #[test]
    fn test_empty_set_readable() {
        let v = character_set(CharacterSet::default());
        assert_eq!(v.readable(), "in required character set");
        assert!(v.is_valid(&s("")));
        assert!(!v.is_valid(&s("a")));
    }

    #[test]
    fn test_whitespace_excludes_newlines() {
        let set = CharacterSet::whitespaces();
        assert!(set.contains(' '));
        assert!(set.contains('\t'));
        assert!(!set.contains('\n'));
        assert!(CharacterSet::newlines().contains('\u{2028}'));
    }

    #[test]
    fn test_non_string_fails() {
        assert_eq!(
            ascii().validate(&ValidationData::Null).unwrap_err().reason(),
            "data is not in ASCII: null values are not strings"
        );
        assert!(!ascii().is_valid(&ValidationData::Int(1)));
    }
}
