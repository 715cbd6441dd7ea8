//! Parse-based string leaves

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::ValidationData;
use crate::error::ValidationError;
use crate::validator::Validator;
use crate::validators::require_str;

/// A string leaf that accepts whatever `parses` accepts.
fn parsed<F>(readable: &str, parses: F) -> Validator
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let readable = readable.to_string();
    let message = format!("is not {}", readable);
    Validator::new(readable.clone(), move |data: &ValidationData| {
        if parses(require_str(data, &readable)?) {
            Ok(())
        } else {
            Err(ValidationError::basic(message.clone()))
        }
    })
}

/// A syntactically valid JSON document.
///
/// ```rust
/// use weir::validators::json;
/// use weir::ValidationData;
///
/// assert!(json().is_valid(&ValidationData::from(r#"{"a": [1, 2]}"#)));
/// assert!(!json().is_valid(&ValidationData::from("{notAValidJSON: notValid}")));
/// ```
pub fn json() -> Validator {
    parsed("a valid JSON document", |s| {
        serde_json::from_str::<serde_json::Value>(s).is_ok()
    })
}

/// A string that parses as a floating-point number.
pub fn numeric() -> Validator {
    parsed("numeric", |s| s.trim().parse::<f64>().is_ok())
}

/// An empty string, or a date in `format` (chrono `strftime` syntax).
///
/// The format may describe a date-time, a date-time with offset, or a date
/// alone.
///
/// ```rust
/// use weir::validators::date;
/// use weir::ValidationData;
///
/// let v = date("%Y-%m-%d");
/// assert!(v.is_valid(&ValidationData::from("2018-07-19")));
/// assert!(v.is_valid(&ValidationData::from("")));
/// assert!(!v.is_valid(&ValidationData::from("2018-13-19")));
/// ```
pub fn date(format: &str) -> Validator {
    let format = format.to_string();
    parsed("a valid date", move |s| {
        s.is_empty()
            || NaiveDateTime::parse_from_str(s, &format).is_ok()
            || NaiveDate::parse_from_str(s, &format).is_ok()
            || DateTime::parse_from_str(s, &format).is_ok()
    })
}

/// A dotted-quad IPv4 address.
pub fn ipv4() -> Validator {
    parsed("a valid IPv4 address", |s| s.parse::<Ipv4Addr>().is_ok())
}

/// An IPv6 address.
pub fn ipv6() -> Validator {
    parsed("a valid IPv6 address", |s| s.parse::<Ipv6Addr>().is_ok())
}

/// An IPv4 or IPv6 address.
pub fn ip() -> Validator {
    parsed("a valid IP address", |s| s.parse::<IpAddr>().is_ok())
}
