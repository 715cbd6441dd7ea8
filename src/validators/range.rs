//! Bounds on values and on sizes

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use chrono::{DateTime, TimeDelta, Utc};

use crate::data::ValidationData;
use crate::error::ValidationError;
use crate::validator::Validator;

/// One end of a range, normalized for comparison against validation data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    /// Any integer bound.
    Integer(i128),
    /// A floating-point bound.
    Float(f64),
    /// A point in time.
    Date(DateTime<Utc>),
}

impl Limit {
    /// Move one unit: integers and floats by 1, dates by one second.
    fn step(self, forward: bool) -> Limit {
        match self {
            Limit::Integer(n) => {
                let moved = if forward {
                    n.checked_add(1)
                } else {
                    n.checked_sub(1)
                };
                Limit::Integer(moved.unwrap_or(n))
            }
            Limit::Float(f) => Limit::Float(if forward { f + 1.0 } else { f - 1.0 }),
            Limit::Date(d) => {
                let second = TimeDelta::seconds(1);
                let moved = if forward {
                    d.checked_add_signed(second)
                } else {
                    d.checked_sub_signed(second)
                };
                Limit::Date(moved.unwrap_or(d))
            }
        }
    }

    /// `None` when the two limits measure different things (a date and a number).
    fn compare(&self, other: &Limit) -> Option<Option<Ordering>> {
        match (self, other) {
            (Limit::Integer(a), Limit::Integer(b)) => Some(Some(a.cmp(b))),
            (Limit::Integer(a), Limit::Float(b)) => Some((*a as f64).partial_cmp(b)),
            (Limit::Float(a), Limit::Integer(b)) => Some(a.partial_cmp(&(*b as f64))),
            (Limit::Float(a), Limit::Float(b)) => Some(a.partial_cmp(b)),
            (Limit::Date(a), Limit::Date(b)) => Some(Some(a.cmp(b))),
            _ => None,
        }
    }

    fn is_date(&self) -> bool {
        matches!(self, Limit::Date(_))
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Integer(n) => write!(f, "{}", n),
            Limit::Float(v) => write!(f, "{}", v),
            Limit::Date(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

/// Types usable as the bounds of [`range`].
pub trait RangeBound: Copy {
    /// This bound as a [`Limit`].
    fn limit(self) -> Limit;
}

macro_rules! impl_integer_bound {
    ($($t:ty),+) => {
        $(
            impl RangeBound for $t {
                #[inline]
                fn limit(self) -> Limit {
                    Limit::Integer(i128::from(self))
                }
            }
        )+
    };
}

impl_integer_bound!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl RangeBound for usize {
    #[inline]
    fn limit(self) -> Limit {
        Limit::Integer(self as i128)
    }
}

impl RangeBound for isize {
    #[inline]
    fn limit(self) -> Limit {
        Limit::Integer(self as i128)
    }
}

impl RangeBound for f64 {
    #[inline]
    fn limit(self) -> Limit {
        Limit::Float(self)
    }
}

impl RangeBound for f32 {
    #[inline]
    fn limit(self) -> Limit {
        Limit::Float(f64::from(self))
    }
}

impl RangeBound for DateTime<Utc> {
    #[inline]
    fn limit(self) -> Limit {
        Limit::Date(self)
    }
}

/// Inclusive bounds; `None` leaves that side unchecked.
#[derive(Debug, Clone, Copy)]
struct Limits {
    min: Option<Limit>,
    max: Option<Limit>,
}

impl Limits {
    fn from_range<B: RangeBound, R: RangeBounds<B>>(range: &R) -> Self {
        let min = match range.start_bound() {
            Bound::Included(b) => Some(b.limit()),
            Bound::Excluded(b) => Some(b.limit().step(true)),
            Bound::Unbounded => None,
        };
        let max = match range.end_bound() {
            Bound::Included(b) => Some(b.limit()),
            Bound::Excluded(b) => Some(b.limit().step(false)),
            Bound::Unbounded => None,
        };
        Limits { min, max }
    }

    fn phrase(&self) -> String {
        let dates = self.min.or(self.max).is_some_and(|l| l.is_date());
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => format!("between {} and {}", min, max),
            (Some(min), None) if dates => format!("on or after {}", min),
            (Some(min), None) => format!("at least {}", min),
            (None, Some(max)) if dates => format!("on or before {}", max),
            (None, Some(max)) => format!("at most {}", max),
            (None, None) => "valid".to_string(),
        }
    }

    /// `None` when `value` cannot be compared with these bounds.
    fn contains(&self, value: &Limit) -> Option<bool> {
        let above_min = match &self.min {
            Some(min) => value.compare(min)?.is_some_and(|o| o != Ordering::Less),
            None => true,
        };
        let below_max = match &self.max {
            Some(max) => value.compare(max)?.is_some_and(|o| o != Ordering::Greater),
            None => true,
        };
        Some(above_min && below_max)
    }
}

/// Bounds on a value, or on the character count of a string.
///
/// Integers, doubles and dates are compared by value; strings by their number
/// of characters. Integer and floating-point bounds compare across numeric
/// variants. Exclusive bounds are stored as the inclusive bound one unit
/// inside (one second for dates).
///
/// # Example
///
/// ```rust
/// use weir::validators::range;
/// use weir::ValidationData;
///
/// let adult = range(18..);
/// assert_eq!(adult.readable(), "at least 18");
/// assert!(adult.is_valid(&ValidationData::Int(23)));
///
/// let err = adult.validate(&ValidationData::Int(5)).unwrap_err();
/// assert_eq!(err.reason(), "data is not at least 18");
///
/// let ratio = range(0.0..=1.0);
/// assert!(ratio.is_valid(&ValidationData::Double(0.5)));
/// assert!(ratio.is_valid(&ValidationData::Int(1)));
/// ```
pub fn range<B, R>(range: R) -> Validator
where
    B: RangeBound,
    R: RangeBounds<B>,
{
    let limits = Limits::from_range(&range);
    let phrase = limits.phrase();
    Validator::new(phrase.clone(), move |data: &ValidationData| {
        let (value, unit) = match data {
            ValidationData::String(s) => (Limit::Integer(s.chars().count() as i128), " characters"),
            ValidationData::Int(n) => (Limit::Integer(i128::from(*n)), ""),
            ValidationData::UInt(n) => (Limit::Integer(i128::from(*n)), ""),
            ValidationData::Double(v) => (Limit::Float(*v), ""),
            ValidationData::Date(d) => (Limit::Date(*d), ""),
            other => return Err(incomparable(other, &phrase)),
        };
        match limits.contains(&value) {
            Some(true) => Ok(()),
            Some(false) => Err(ValidationError::basic(format!("is not {}{}", phrase, unit))),
            None => Err(incomparable(data, &phrase)),
        }
    })
}

fn incomparable(data: &ValidationData, phrase: &str) -> ValidationError {
    ValidationError::basic(format!(
        "is not comparable: {} values cannot be {}",
        data.kind(),
        phrase
    ))
}

/// Bounds on the size of a string (characters) or collection (elements).
///
/// # Example
///
/// ```rust
/// use weir::validators::count;
/// use weir::ValidationData;
///
/// let name = count(5..=10);
/// assert_eq!(name.readable(), "between 5 and 10 characters");
/// assert!(name.is_valid(&ValidationData::from("Tanner")));
/// assert_eq!(
///     name.validate(&ValidationData::from("Al")).unwrap_err().reason(),
///     "data is not between 5 and 10 characters"
/// );
/// ```
pub fn count<R: RangeBounds<usize>>(range: R) -> Validator {
    let limits = Limits::from_range(&range);
    let phrase = limits.phrase();
    let readable = if limits.min.is_none() && limits.max.is_none() {
        phrase.clone()
    } else {
        format!("{} characters", phrase)
    };
    let message = format!("is not {}", readable);
    Validator::new(readable, move |data: &ValidationData| {
        let len = data.len().ok_or_else(|| {
            ValidationError::basic(format!(
                "{}: {} values have no size",
                message,
                data.kind()
            ))
        })?;
        if limits.contains(&Limit::Integer(len as i128)) == Some(true) {
            return Ok(());
        }
        match data {
            ValidationData::String(_) => Err(ValidationError::basic(message.clone())),
            _ => Err(ValidationError::basic(format!(
                "{}: {} has {} elements",
                message,
                data.kind(),
                len
            ))),
        }
    })
}
