//! Expiry date parsing and classification.
//!
//! The only accepted input format is `MM/YY`: two digits, a slash, two
//! digits. The year is expanded to `20YY`.
//!
//! # Example
//!
//! ```
//! use cardguard::expiry::{Expiry, ExpiryStatus, YearMonth};
//!
//! let today = YearMonth::new(2024, 6).unwrap();
//!
//! assert_eq!(Expiry::parse("03/24").unwrap().status(today), ExpiryStatus::Expired);
//! assert_eq!(Expiry::parse("12/24").unwrap().status(today), ExpiryStatus::ExpiringSoon);
//! assert_eq!(Expiry::parse("01/26").unwrap().status(today), ExpiryStatus::Valid);
//! ```

use chrono::Datelike;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// A calendar month, used as "today" when classifying expiry dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Creates a year-month. Returns `None` unless `month` is 1-12.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Takes the year and month of a chrono date.
    ///
    /// Years outside `0..=65535` are clamped.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        let year = u16::try_from(date.year().max(0)).unwrap_or(u16::MAX);
        Self {
            year,
            // chrono months are always 1-12
            month: date.month() as u8,
        }
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// A parsed card expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expiry {
    /// Month (1-12)
    month: u8,
    /// Four-digit year (e.g., 2025)
    year: u16,
}

impl Expiry {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Parses an `MM/YY` expiry string.
    ///
    /// ```
    /// use cardguard::expiry::{Expiry, ExpiryError};
    ///
    /// let expiry = Expiry::parse("09/27").unwrap();
    /// assert_eq!(expiry.month(), 9);
    /// assert_eq!(expiry.year(), 2027);
    ///
    /// assert_eq!(Expiry::parse("9/27"), Err(ExpiryError::InvalidFormat));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ExpiryError> {
        match input.as_bytes() {
            [] => Err(ExpiryError::Empty),
            [m1 @ b'0'..=b'9', m2 @ b'0'..=b'9', b'/', y1 @ b'0'..=b'9', y2 @ b'0'..=b'9'] => {
                let month = (m1 - b'0') * 10 + (m2 - b'0');
                let yy = u16::from((y1 - b'0') * 10 + (y2 - b'0'));
                Self::new(month, 2000 + yy).ok_or(ExpiryError::InvalidMonth(month))
            }
            _ => Err(ExpiryError::InvalidFormat),
        }
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Classifies this date relative to `today`.
    #[inline]
    pub fn status(&self, today: YearMonth) -> ExpiryStatus {
        classify(*self, today)
    }

    /// Returns the number of months from `today` until the expiry month.
    ///
    /// Returns 0 if already expired.
    pub fn months_until(&self, today: YearMonth) -> u32 {
        let expiry_months = (self.year as u32) * 12 + (self.month as u32);
        let current_months = (today.year as u32) * 12 + (today.month as u32);

        expiry_months.saturating_sub(current_months)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Expiry status of a card relative to the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The expiry month is in the past.
    Expired,
    /// The card expires within the warning window.
    ExpiringSoon,
    /// Neither of the above.
    Valid,
}

impl ExpiryStatus {
    /// Returns the console line for this status.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Expired => "🔴 Status: Card is **Expired**!",
            Self::ExpiringSoon => "🟡 Status: Card is expiring **soon**!",
            Self::Valid => "🟢 Status: Card is **Valid**.",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring soon",
            Self::Valid => "Valid",
        };
        f.write_str(label)
    }
}

/// Classifies an expiry date against `today`.
///
/// Rules, first match wins:
///
/// 1. Expired: the expiry year is past, or it is this year and the month is past.
/// 2. Expiring soon: this year and at most 6 months ahead, or next year with
///    an expiry month earlier than the current month.
/// 3. Valid: everything else.
///
/// The second half of rule 2 covers the wrap into next year. It reaches up to
/// 11 months ahead (expiry 05/25 seen from 06/24), while the first half stops
/// at 6, so the window is not symmetric around new year.
pub fn classify(expiry: Expiry, today: YearMonth) -> ExpiryStatus {
    let year = i32::from(expiry.year);
    let month = i32::from(expiry.month);
    let current_year = i32::from(today.year);
    let current_month = i32::from(today.month);

    if year < current_year || (year == current_year && month < current_month) {
        ExpiryStatus::Expired
    } else if (year == current_year && month - current_month <= 6)
        || (year == current_year + 1 && current_month > month)
    {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Valid
    }
}

/// Errors that can occur while parsing an expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    /// The input string is empty.
    #[error("expiry date is empty")]
    Empty,
    /// Not of the form `MM/YY`.
    #[error("invalid expiry format (expected MM/YY)")]
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    #[error("invalid month {0}: must be 1-12")]
    InvalidMonth(u8),
}
