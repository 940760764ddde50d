//! Day count conventions.
//!
//! A day count convention turns a pair of dates into the year fraction the
//! curve uses wherever a Δt is needed rather than a raw day count.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: actual days over a fixed 365-day year (ACT/365F)
//! - [`Act365Leap`]: actual days over 366 when the period spans a leap day,
//!   365 otherwise (ACT/365L)

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Returns the number of days between two dates according to the
    /// convention.
    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates; the year
/// basis is always 365 days, ignoring leap years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = start.days_between(&end);
        Decimal::from(days) / Decimal::from(365)
    }
}

/// Actual/365 Leap day count convention (ACT/365L).
///
/// The denominator is 366 if the period includes February 29 of a leap
/// year, otherwise 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Leap;

impl DayCount for Act365Leap {
    fn name(&self) -> &'static str {
        "ACT/365L"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = start.days_between(&end);
        let basis = if period_spans_leap_day(start, end) {
            366
        } else {
            365
        };
        Decimal::from(days) / Decimal::from(basis)
    }
}

/// Returns true if the half-open period (start, end] contains a Feb 29.
fn period_spans_leap_day(start: Date, end: Date) -> bool {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };

    for year in lo.year()..=hi.year() {
        if let Ok(leap_day) = Date::from_ymd(year, 2, 29) {
            if lo < leap_day && leap_day <= hi {
                return true;
            }
        }
    }
    false
}

/// Year fraction between two dates on the ACT/365F basis, as `f64`.
///
/// The curve engine works in `f64`; this is the convention every Δt in the
/// curve point store and bootstrap uses.
#[must_use]
pub fn year_fraction_act365(start: Date, end: Date) -> f64 {
    Act365Fixed
        .year_fraction(start, end)
        .to_f64()
        .unwrap_or(0.0)
}
