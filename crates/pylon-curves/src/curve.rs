//! The bootstrapped curve: a date-ordered store of curve points.
//!
//! A [`YieldCurve`] holds one representative value per pillar date and
//! answers queries by linear interpolation between pillars, in the stored
//! representation. Discount factor queries convert the interpolated value
//! through the curve's [`RateConversion`].

use pylon_core::daycounts::year_fraction_act365;
use pylon_core::{Date, Frequency};
use pylon_math::interpolation::linear_between;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conversion::{RateConversion, ZeroRateConversion};
use crate::error::{CurveError, CurveResult};
use crate::instruments::InstrumentKind;

/// Representation stored at the curve's pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurveType {
    /// Compounded zero-coupon rates.
    #[default]
    ZeroCouponRate,
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCouponRate => f.write_str("zero-coupon rate"),
        }
    }
}

/// One pillar: a date, the value stored at it, and how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// The pillar date.
    pub date: Date,
    /// The stored representative value.
    pub value: f64,
    /// Year fraction from the curve start to the pillar date.
    pub year_fraction: f64,
    /// Kind of the instrument that fixed this pillar.
    pub kind: InstrumentKind,
}

/// A date-ordered curve of representative values.
///
/// Points are kept sorted by date; insertion at an existing date is
/// rejected rather than overwritten, so a curve is only ever extended.
/// Queries interpolate linearly on the day offset from the curve start
/// and refuse to extrapolate.
///
/// ```rust
/// use pylon_core::Date;
/// use pylon_curves::curve::{CurveType, YieldCurve};
/// use pylon_curves::instruments::InstrumentKind;
///
/// let start = Date::from_ymd(2025, 6, 16).unwrap();
/// let mut curve = YieldCurve::new(start, CurveType::ZeroCouponRate);
///
/// curve.insert(start, 0.0, InstrumentKind::Fake).unwrap();
/// curve
///     .insert(start.add_days(365), 0.05, InstrumentKind::Swap)
///     .unwrap();
///
/// let mid = curve.value_at(start.add_days(182)).unwrap();
/// assert!(mid > 0.0 && mid < 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldCurve {
    start: Date,
    curve_type: CurveType,
    conversion: ZeroRateConversion,
    points: Vec<CurvePoint>,
}

impl YieldCurve {
    /// Creates an empty curve anchored at `start` with annual compounding.
    #[must_use]
    pub fn new(start: Date, curve_type: CurveType) -> Self {
        Self::with_frequency(start, curve_type, Frequency::Annual)
    }

    /// Creates an empty curve anchored at `start`, compounding its stored
    /// rates at `frequency`.
    #[must_use]
    pub fn with_frequency(start: Date, curve_type: CurveType, frequency: Frequency) -> Self {
        let conversion = match curve_type {
            CurveType::ZeroCouponRate => ZeroRateConversion::new(frequency),
        };
        Self {
            start,
            curve_type,
            conversion,
            points: Vec::new(),
        }
    }

    /// Returns the curve start date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Returns the conversion between stored values and discount factors.
    #[must_use]
    pub fn conversion(&self) -> &ZeroRateConversion {
        &self.conversion
    }

    /// Returns the pillar points in date order.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the number of pillars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no pillars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first pillar date, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    /// Returns the last pillar date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Inserts a stored value at `date`, keeping the points sorted.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DuplicateDate` when a pillar already exists at
    /// `date`.
    pub fn insert(&mut self, date: Date, value: f64, kind: InstrumentKind) -> CurveResult<()> {
        match self.points.binary_search_by(|p| p.date.cmp(&date)) {
            Ok(_) => Err(CurveError::DuplicateDate { date }),
            Err(position) => {
                self.points.insert(
                    position,
                    CurvePoint {
                        date,
                        value,
                        year_fraction: year_fraction_act365(self.start, date),
                        kind,
                    },
                );
                Ok(())
            }
        }
    }

    /// Converts a discount factor for `date` to the stored representation
    /// and inserts it.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DuplicateDate` when a pillar already exists at
    /// `date`.
    pub fn insert_df(
        &mut self,
        date: Date,
        discount_factor: f64,
        kind: InstrumentKind,
    ) -> CurveResult<()> {
        let dt = year_fraction_act365(self.start, date);
        let value = self.conversion.to_specific(discount_factor, dt);
        self.insert(date, value, kind)
    }

    /// Returns the stored value at `date`, interpolating linearly on the
    /// day offset between the surrounding pillars.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyCurve` on an empty curve, and
    /// `CurveError::DateOutOfRange` when `date` lies outside the stored
    /// pillar range.
    pub fn value_at(&self, date: Date) -> CurveResult<f64> {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(CurveError::EmptyCurve),
        };
        if date < first.date || date > last.date {
            return Err(CurveError::date_out_of_range(date, first.date, last.date));
        }

        match self.points.binary_search_by(|p| p.date.cmp(&date)) {
            Ok(i) => Ok(self.points[i].value),
            Err(i) => {
                let left = &self.points[i - 1];
                let right = &self.points[i];
                Ok(linear_between(
                    (self.day_offset(left.date), left.value),
                    (self.day_offset(right.date), right.value),
                    self.day_offset(date),
                ))
            }
        }
    }

    /// Returns the discount factor from the curve start to `date`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyCurve` on an empty curve, and
    /// `CurveError::DateOutOfRange` when `date` lies outside the stored
    /// pillar range.
    pub fn discount_factor_at(&self, date: Date) -> CurveResult<f64> {
        let value = self.value_at(date)?;
        let dt = year_fraction_act365(self.start, date);
        Ok(self.conversion.to_df(value, dt))
    }

    /// Returns the forward discount factor between two curve dates.
    ///
    /// # Errors
    ///
    /// Fails when either date falls outside the stored pillar range.
    pub fn forward_discount_factor(&self, from: Date, to: Date) -> CurveResult<f64> {
        Ok(self.discount_factor_at(to)? / self.discount_factor_at(from)?)
    }

    fn day_offset(&self, date: Date) -> f64 {
        self.start.days_between(&date) as f64
    }
}

/// Quotes the curve back in an instrument's own rate convention.
///
/// Deposits quote simply over the whole period, `(1/df - 1) / dt`; FRAs
/// and swaps quote the compounded zero rate at the curve's frequency.
///
/// # Errors
///
/// Returns `CurveError::UnsupportedInstrument` for the synthetic anchor
/// kind, and propagates curve lookup failures.
pub fn compound_rate(curve: &YieldCurve, date: Date, kind: InstrumentKind) -> CurveResult<f64> {
    let df = curve.discount_factor_at(date)?;
    let dt = year_fraction_act365(curve.start(), date);

    match kind {
        InstrumentKind::Fake => Err(CurveError::UnsupportedInstrument { kind }),
        InstrumentKind::Cash => {
            if dt == 0.0 {
                Ok(0.0)
            } else {
                Ok((1.0 / df - 1.0) / dt)
            }
        }
        InstrumentKind::Fra | InstrumentKind::Swap => Ok(curve.conversion().to_specific(df, dt)),
    }
}
