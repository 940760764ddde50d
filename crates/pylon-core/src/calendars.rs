//! Business day calendars.
//!
//! The baseline calendar skips weekends only; markets that observe named
//! holidays plug in their own [`Calendar`] implementation.

use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays for a
/// specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// The baseline business-day rule for all curve date arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let monday = Date::from_ymd(2025, 1, 6).unwrap();

        assert!(!cal.is_business_day(saturday));
        assert!(cal.is_holiday(saturday));
        assert!(cal.is_business_day(monday));
    }

    #[test]
    fn test_next_business_day() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let monday = Date::from_ymd(2025, 1, 6).unwrap();

        assert_eq!(cal.next_business_day(saturday), monday);
        assert_eq!(cal.next_business_day(monday), monday);
    }

    #[test]
    fn test_previous_business_day() {
        let cal = WeekendCalendar;
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let friday = Date::from_ymd(2025, 1, 3).unwrap();

        assert_eq!(cal.previous_business_day(sunday), friday);
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        let friday = Date::from_ymd(2025, 1, 3).unwrap();

        // Friday + 1 business day = Monday
        assert_eq!(
            cal.add_business_days(friday, 1),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
        // Monday - 1 business day = Friday
        assert_eq!(
            cal.add_business_days(Date::from_ymd(2025, 1, 6).unwrap(), -1),
            friday
        );
    }
}
