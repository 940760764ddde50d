//! Tenor type for market time spans.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{PylonError, PylonResult};

/// The unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days.
    Day,
    /// Calendar weeks (7 days).
    Week,
    /// Calendar months (30-day normalized basis).
    Month,
    /// Calendar quarters (91-day normalized basis).
    Quarter,
    /// Calendar years (365-day normalized basis).
    Year,
}

impl TenorUnit {
    /// Returns the normalized day-equivalent length of one unit.
    ///
    /// These constants are the single source of truth for cross-unit tenor
    /// comparison, ordering, and interpolation weights: 1W = 7d, 1M = 30d,
    /// 1Q = 91d, 1Y = 365d.
    #[must_use]
    pub fn day_basis(&self) -> f64 {
        match self {
            TenorUnit::Day => 1.0,
            TenorUnit::Week => 7.0,
            TenorUnit::Month => 30.0,
            TenorUnit::Quarter => 91.0,
            TenorUnit::Year => 365.0,
        }
    }

    /// Returns the single-letter unit code (`D`, `W`, `M`, `Q`, `Y`).
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Quarter => 'Q',
            TenorUnit::Year => 'Y',
        }
    }

    /// Parses a unit code, accepting single letters and long forms,
    /// case-insensitively.
    pub fn parse(s: &str) -> PylonResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "d" | "day" | "days" => Ok(TenorUnit::Day),
            "w" | "week" | "weeks" => Ok(TenorUnit::Week),
            "m" | "month" | "months" => Ok(TenorUnit::Month),
            "q" | "quarter" | "quarters" => Ok(TenorUnit::Quarter),
            "y" | "year" | "years" => Ok(TenorUnit::Year),
            _ => Err(PylonError::invalid_tenor(s)),
        }
    }
}

impl fmt::Display for TenorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A signed market time span: a magnitude paired with a [`TenorUnit`].
///
/// Tenors are immutable value types. Arithmetic between tenors of different
/// units first normalizes both sides to the common day-equivalent basis of
/// [`TenorUnit::day_basis`]; comparison always orders by normalized day
/// length.
///
/// # Example
///
/// ```rust
/// use pylon_core::types::{Tenor, TenorUnit};
///
/// let three_months = Tenor::parse("3M").unwrap();
/// assert_eq!(three_months.in_days(), 90.0);
/// assert!(three_months < Tenor::parse("1Y").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tenor {
    value: f64,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from a magnitude and unit.
    #[must_use]
    pub fn new(value: f64, unit: TenorUnit) -> Self {
        Self { value, unit }
    }

    /// Creates a tenor of whole days.
    #[must_use]
    pub fn days(value: f64) -> Self {
        Self::new(value, TenorUnit::Day)
    }

    /// Creates a tenor of months.
    #[must_use]
    pub fn months(value: f64) -> Self {
        Self::new(value, TenorUnit::Month)
    }

    /// Creates a tenor of years.
    #[must_use]
    pub fn years(value: f64) -> Self {
        Self::new(value, TenorUnit::Year)
    }

    /// Parses a tenor literal: a signed numeric magnitude followed by a
    /// unit code (e.g. `"3M"`, `"-2w"`, `"10Y"`).
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidTenor` naming the raw text when the
    /// magnitude or unit cannot be parsed. Call [`Tenor::is_valid`] first
    /// when the input is untrusted.
    pub fn parse(text: &str) -> PylonResult<Self> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| PylonError::invalid_tenor(text))?;

        let (magnitude, unit) = trimmed.split_at(split);
        let value: f64 = magnitude
            .trim()
            .parse()
            .map_err(|_| PylonError::invalid_tenor(text))?;

        Ok(Self::new(value, TenorUnit::parse(unit)?))
    }

    /// Returns true if `text` is a well-formed tenor literal.
    ///
    /// Callers are expected to validate untrusted input with this predicate
    /// before constructing; a failed [`Tenor::parse`] after a positive
    /// `is_valid` check is a programmer error.
    #[must_use]
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Returns the magnitude in the tenor's own unit.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns the normalized day-equivalent length.
    #[must_use]
    pub fn in_days(&self) -> f64 {
        self.value * self.unit.day_basis()
    }

    /// Re-expresses the magnitude in another unit's normalized day basis.
    #[must_use]
    pub fn in_unit(&self, unit: TenorUnit) -> f64 {
        self.in_days() / unit.day_basis()
    }

    /// Returns the dimensionless ratio of two tenors on the day basis.
    ///
    /// # Errors
    ///
    /// Returns `PylonError::InvalidTenorArithmetic` when `rhs` normalizes
    /// to zero days.
    pub fn ratio(&self, rhs: &Tenor) -> PylonResult<f64> {
        let denom = rhs.in_days();
        if denom == 0.0 {
            return Err(PylonError::invalid_tenor_arithmetic(format!(
                "ratio against zero-length tenor {rhs}"
            )));
        }
        Ok(self.in_days() / denom)
    }

    /// Returns true if the tenor normalizes to zero days.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.in_days() == 0.0
    }

    /// Returns the magnitude as a literal without the unit suffix
    /// (e.g. `"3"` for a 3M tenor).
    #[must_use]
    pub fn literal(&self) -> String {
        format_magnitude(self.value)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_magnitude(self.value), self.unit)
    }
}

/// Formats a magnitude without a trailing `.0` for whole numbers.
fn format_magnitude(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_days().partial_cmp(&other.in_days())
    }
}

impl Add for Tenor {
    type Output = Tenor;

    /// Adds two tenors; mixed units produce a day-based result.
    fn add(self, rhs: Tenor) -> Tenor {
        if self.unit == rhs.unit {
            Tenor::new(self.value + rhs.value, self.unit)
        } else {
            Tenor::days(self.in_days() + rhs.in_days())
        }
    }
}

impl Sub for Tenor {
    type Output = Tenor;

    /// Subtracts two tenors; mixed units produce a day-based result.
    fn sub(self, rhs: Tenor) -> Tenor {
        if self.unit == rhs.unit {
            Tenor::new(self.value - rhs.value, self.unit)
        } else {
            Tenor::days(self.in_days() - rhs.in_days())
        }
    }
}

impl Mul<f64> for Tenor {
    type Output = Tenor;

    fn mul(self, rhs: f64) -> Tenor {
        Tenor::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Tenor {
    type Output = Tenor;

    fn div(self, rhs: f64) -> Tenor {
        Tenor::new(self.value / rhs, self.unit)
    }
}

impl Div for Tenor {
    type Output = f64;

    /// Dimensionless ratio on the normalized day basis.
    ///
    /// Callers must guard against a zero-length divisor; prefer
    /// [`Tenor::ratio`] when the divisor is not known to be non-zero.
    fn div(self, rhs: Tenor) -> f64 {
        self.in_days() / rhs.in_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic() {
        let t = Tenor::parse("3M").unwrap();
        assert_eq!(t.value(), 3.0);
        assert_eq!(t.unit(), TenorUnit::Month);

        let t = Tenor::parse("10y").unwrap();
        assert_eq!(t.unit(), TenorUnit::Year);

        let t = Tenor::parse("-2W").unwrap();
        assert_eq!(t.value(), -2.0);
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(Tenor::parse("2 weeks").unwrap().unit(), TenorUnit::Week);
        assert_eq!(Tenor::parse("1 quarter").unwrap().unit(), TenorUnit::Quarter);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Tenor::parse("").is_err());
        assert!(Tenor::parse("M3").is_err());
        assert!(Tenor::parse("3Z").is_err());
        assert!(Tenor::parse("abc").is_err());
        assert!(!Tenor::is_valid("3x6"));
        assert!(Tenor::is_valid("3M"));
    }

    #[test]
    fn test_invalid_parse_names_input() {
        let err = Tenor::parse("3Z").unwrap_err();
        assert!(err.to_string().contains("3Z"));
    }

    #[test]
    fn test_day_normalization() {
        assert_eq!(Tenor::parse("1W").unwrap().in_days(), 7.0);
        assert_eq!(Tenor::parse("3M").unwrap().in_days(), 90.0);
        assert_eq!(Tenor::parse("1Q").unwrap().in_days(), 91.0);
        assert_eq!(Tenor::parse("2Y").unwrap().in_days(), 730.0);
    }

    #[test]
    fn test_in_unit() {
        let t = Tenor::parse("1Y").unwrap();
        assert_relative_eq!(t.in_unit(TenorUnit::Month), 365.0 / 30.0, epsilon = 1e-12);
        assert_relative_eq!(t.in_unit(TenorUnit::Day), 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ordering_across_units() {
        let m11 = Tenor::months(11.0);
        let y1 = Tenor::years(1.0);
        assert!(m11 < y1); // 330 days < 365 days
        assert_eq!(
            Tenor::days(7.0).partial_cmp(&Tenor::new(1.0, TenorUnit::Week)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_scalar_arithmetic() {
        let t = Tenor::months(6.0) / 2.0;
        assert_eq!(t.value(), 3.0);
        assert_eq!(t.unit(), TenorUnit::Month);

        let t = Tenor::months(3.0) * 4.0;
        assert_eq!(t.in_days(), 360.0);
    }

    #[test]
    fn test_tenor_ratio() {
        let half = Tenor::days(50.0) / Tenor::days(100.0);
        assert_relative_eq!(half, 0.5, epsilon = 1e-12);

        let r = Tenor::months(6.0).ratio(&Tenor::years(1.0)).unwrap();
        assert_relative_eq!(r, 180.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ratio_zero_divisor() {
        let err = Tenor::months(6.0).ratio(&Tenor::days(0.0));
        assert!(err.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenor::parse("3M").unwrap().to_string(), "3M");
        assert_eq!(Tenor::parse("10y").unwrap().to_string(), "10Y");
        assert_eq!(Tenor::months(3.0).literal(), "3");
        assert_eq!(Tenor::new(1.5, TenorUnit::Year).to_string(), "1.5Y");
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Tenor::parse("3M").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Tenor = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }

    fn arb_tenor() -> impl Strategy<Value = Tenor> {
        let unit = prop_oneof![
            Just(TenorUnit::Day),
            Just(TenorUnit::Week),
            Just(TenorUnit::Month),
            Just(TenorUnit::Quarter),
            Just(TenorUnit::Year),
        ];
        (-1000i32..1000, unit).prop_map(|(v, u)| Tenor::new(f64::from(v), u))
    }

    proptest! {
        #[test]
        fn prop_sub_then_add_restores(d1 in arb_tenor(), d2 in arb_tenor()) {
            let restored = (d1 - d2) + d2;
            prop_assert!((restored.in_days() - d1.in_days()).abs() < 1e-9);
        }

        #[test]
        fn prop_parse_display_roundtrip(d in arb_tenor()) {
            let reparsed = Tenor::parse(&d.to_string()).unwrap();
            prop_assert_eq!(reparsed, d);
        }
    }
}
