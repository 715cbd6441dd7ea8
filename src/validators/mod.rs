//! Leaf validators over [`ValidationData`]
//!
//! Every constructor here returns a [`Validator<ValidationData>`](crate::Validator).
//! Leaves never assign paths. A failing leaf reports one [`ValidationError`]
//! whose message contains its readable clause, whatever the input.
//!
//! | Family | Constructors |
//! |--------|--------------|
//! | Size and bounds | [`count`], [`range`] |
//! | Characters | [`character_set`], [`ascii`], [`alphanumeric`] |
//! | Presence | [`nil`], [`empty`], [`required`] |
//! | Patterns | [`email`], [`hexadecimal`], [`md5`], [`mac_address`], [`mongo_id`], [`uuid`], [`base64`], [`printable_ascii`], [`strong_password`], [`pattern`] |
//! | Phone numbers | [`phone`], [`phone_custom`] |
//! | Formats | [`json`], [`numeric`], [`date`], [`ipv4`], [`ipv6`], [`ip`] |
//! | Typed equality | [`equal_to`], [`different_from`] |
//!
//! Pattern and format leaves require string input: any other variant,
//! including `Null`, fails with `"is not <readable>: <kind> values are not
//! strings"`. Combine with
//! [`nil`] to accept absent values:
//!
//! ```rust
//! use weir::validators::{email, nil};
//! use weir::ValidationData;
//!
//! let optional_email = nil() | email();
//! assert!(optional_email.is_valid(&ValidationData::Null));
//! assert!(optional_email.is_valid(&ValidationData::from("tanner@vapor.codes")));
//! assert!(!optional_email.is_valid(&ValidationData::from("bad")));
//! ```

mod character_set;
mod equality;
mod format;
mod pattern;
mod phone;
mod presence;
mod range;

pub use character_set::{alphanumeric, ascii, character_set, CharacterSet};
pub use equality::{different_from, equal_to};
pub use format::{date, ip, ipv4, ipv6, json, numeric};
pub use pattern::{
    base64, email, hexadecimal, mac_address, md5, mongo_id, pattern, printable_ascii,
    strong_password, uuid, UuidVersion,
};
pub use phone::{phone, phone_custom, PhoneFormat, PhoneType};
pub use presence::{empty, nil, required};
pub use range::{count, range, Limit, RangeBound};

use crate::data::ValidationData;
use crate::error::ValidationError;

/// The string payload, or the type-mismatch error every string leaf reports.
pub(crate) fn require_str<'a>(
    data: &'a ValidationData,
    readable: &str,
) -> Result<&'a str, ValidationError> {
    data.as_str().ok_or_else(|| {
        ValidationError::basic(format!(
            "is not {}: {} values are not strings",
            readable,
            data.kind()
        ))
    })
}
