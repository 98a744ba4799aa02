//! Source of "today" for expiry classification.
//!
//! The pipeline never reads the system clock directly; it asks a [`Clock`].

use crate::expiry::YearMonth;

/// Provides the current year and month.
pub trait Clock {
    /// Returns the current year and month.
    fn today(&self) -> YearMonth;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> YearMonth {
        (**self).today()
    }
}

/// Reads the local date from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        YearMonth::from_date(&chrono::Local::now())
    }
}

/// Always returns the same month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn today(&self) -> YearMonth {
        self.0
    }
}
