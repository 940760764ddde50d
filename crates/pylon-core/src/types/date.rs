//! Date type for curve calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::calendars::{Calendar, WeekendCalendar};
use crate::error::{PylonError, PylonResult};
use crate::types::tenor::{Tenor, TenorUnit};

/// A Gregorian calendar date.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing the
/// market-convention date arithmetic the curve engine relies on:
///
/// - `date.add_tenor(t)` lands on the naive calendar result and then rolls
///   forward to the next business day;
/// - `date - date` yields a whole-day [`Tenor`];
/// - `date.sub_tenor(t)` applies no business-day adjustment.
///
/// # Example
///
/// ```rust
/// use pylon_core::types::{Date, Tenor};
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// let future = date.add_tenor(Tenor::parse("3M").unwrap()).unwrap();
/// assert_eq!(future, Date::from_ymd(2025, 9, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> PylonResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| PylonError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> PylonResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| PylonError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Adds a number of calendar days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> PylonResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> PylonResult<Self> {
        let new_year = self.year() + years;
        let max_day = days_in_month(new_year, self.month());
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks if the date is a weekday (Monday through Friday).
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Adds a tenor on the calendar, then rolls forward to the next
    /// business day of the baseline weekend calendar.
    ///
    /// Whole month/quarter/year magnitudes step the calendar exactly
    /// (end-of-month clamped); fractional magnitudes fall back to the
    /// normalized day-equivalent count.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the result is out of range.
    pub fn add_tenor(&self, tenor: Tenor) -> PylonResult<Self> {
        self.add_tenor_with(tenor, &WeekendCalendar)
    }

    /// Adds a tenor, rolling forward on a caller-supplied calendar.
    pub fn add_tenor_with(&self, tenor: Tenor, calendar: &dyn Calendar) -> PylonResult<Self> {
        let landed = self.add_tenor_unadjusted(tenor)?;
        Ok(calendar.next_business_day(landed))
    }

    /// Subtracts a tenor on the calendar.
    ///
    /// No business-day adjustment is applied on subtraction.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidDate` if the result is out of range.
    pub fn sub_tenor(&self, tenor: Tenor) -> PylonResult<Self> {
        self.add_tenor_unadjusted(tenor * -1.0)
    }

    /// Naive calendar addition of a tenor, without business-day rolling.
    fn add_tenor_unadjusted(&self, tenor: Tenor) -> PylonResult<Self> {
        let value = tenor.value();
        if value.fract() != 0.0 {
            return Ok(self.add_days(tenor.in_days().round() as i64));
        }

        let n = value as i32;
        match tenor.unit() {
            TenorUnit::Day => Ok(self.add_days(i64::from(n))),
            TenorUnit::Week => Ok(self.add_days(7 * i64::from(n))),
            TenorUnit::Month => self.add_months(n),
            TenorUnit::Quarter => self.add_months(3 * n),
            TenorUnit::Year => self.add_years(n),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds calendar days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts calendar days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = Tenor;

    /// Returns the whole-day tenor between two dates.
    fn sub(self, other: Date) -> Self::Output {
        Tenor::days(other.days_between(&self) as f64)
    }
}

/// A [`Date`] guaranteed to be a business day.
///
/// If the input date is not a business day it is advanced forward to the
/// nearest following business day once, at construction; the result is
/// otherwise an ordinary immutable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDate(Date);

impl WorkDate {
    /// Creates a work date, rolling forward on the baseline weekend
    /// calendar when needed.
    #[must_use]
    pub fn new(date: Date) -> Self {
        Self::with_calendar(date, &WeekendCalendar)
    }

    /// Creates a work date, rolling forward on a caller-supplied calendar.
    #[must_use]
    pub fn with_calendar(date: Date, calendar: &dyn Calendar) -> Self {
        WorkDate(calendar.next_business_day(date))
    }

    /// Returns the underlying date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.0
    }
}

impl From<WorkDate> for Date {
    fn from(date: WorkDate) -> Self {
        date.0
    }
}

impl fmt::Display for WorkDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Helper function to get days in a month for a given year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("Invalid month: {month}"),
    }
}

/// Helper function to check if a year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
