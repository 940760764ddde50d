//! Conversions between discount factors and curve-specific values.
//!
//! Curves store one representative value per point and interpolate in that
//! representation; a [`RateConversion`] maps between the stored value and
//! the discount factor the pricing layer works with. The zero-coupon
//! implementation stores annually-compounded zero rates.

use pylon_core::Frequency;
use serde::{Deserialize, Serialize};

/// Maps between discount factors and a curve's stored representation.
///
/// Implementations must be mutually inverse over their domain:
/// `to_df(to_specific(df, dt), dt) == df` for `dt > 0` and `df` in
/// `(0, 1]`.
pub trait RateConversion {
    /// Converts a discount factor to the stored curve value for a period
    /// of `year_fraction` years.
    fn to_specific(&self, discount_factor: f64, year_fraction: f64) -> f64;

    /// Converts a stored curve value back to a discount factor for a
    /// period of `year_fraction` years.
    fn to_df(&self, specific_value: f64, year_fraction: f64) -> f64;
}

/// Discount factor / zero-coupon rate conversion at a fixed compounding
/// frequency.
///
/// With `f` periods per year and period length `dt`:
///
/// ```text
/// z  = f * (exp(-ln(df) / (f * dt)) - 1)
/// df = exp(-dt * f * ln(1 + z / f))
/// ```
///
/// A zero-length period maps `df = 1` to a zero rate of `0` (the limit of
/// the formulas as `dt -> 0` with `df -> 1`), which keeps the curve's
/// anchor point well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroRateConversion {
    frequency: Frequency,
}

impl ZeroRateConversion {
    /// Creates a conversion compounding at the given frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    /// Creates the annually-compounded conversion.
    #[must_use]
    pub fn annual() -> Self {
        Self::new(Frequency::Annual)
    }

    /// Returns the compounding frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }
}

impl Default for ZeroRateConversion {
    fn default() -> Self {
        Self::annual()
    }
}

impl RateConversion for ZeroRateConversion {
    fn to_specific(&self, discount_factor: f64, year_fraction: f64) -> f64 {
        if year_fraction <= 0.0 {
            return 0.0;
        }
        let f = f64::from(self.frequency.periods_per_year());
        f * ((-discount_factor.ln() / (f * year_fraction)).exp() - 1.0)
    }

    fn to_df(&self, specific_value: f64, year_fraction: f64) -> f64 {
        if year_fraction <= 0.0 {
            return 1.0;
        }
        let f = f64::from(self.frequency.periods_per_year());
        (-year_fraction * f * (1.0 + specific_value / f).ln()).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_annual_zero_rate_from_df() {
        // df = 1/(1+z)^t with annual compounding: t = 1, z = 5%.
        let conv = ZeroRateConversion::annual();

        let z = conv.to_specific(1.0 / 1.05, 1.0);
        assert_relative_eq!(z, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_df_from_annual_zero_rate() {
        let conv = ZeroRateConversion::annual();

        let df = conv.to_df(0.05, 2.0);
        assert_relative_eq!(df, 1.0 / (1.05_f64.powi(2)), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_period_is_anchor() {
        let conv = ZeroRateConversion::annual();

        assert_relative_eq!(conv.to_specific(1.0, 0.0), 0.0);
        assert_relative_eq!(conv.to_df(0.0, 0.0), 1.0);
        assert_relative_eq!(conv.to_df(0.05, 0.0), 1.0);
    }

    #[test]
    fn test_semi_annual_compounding() {
        let conv = ZeroRateConversion::new(Frequency::SemiAnnual);

        // df = (1 + z/2)^(-2t) with t = 1.5, z = 4%.
        let df = conv.to_df(0.04, 1.5);
        assert_relative_eq!(df, 1.02_f64.powi(-3), epsilon = 1e-12);
        assert_relative_eq!(conv.to_specific(df, 1.5), 0.04, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_conversion_round_trip(
            df in 0.2_f64..1.0,
            dt in 0.01_f64..30.0,
        ) {
            let conv = ZeroRateConversion::annual();

            let z = conv.to_specific(df, dt);
            let back = conv.to_df(z, dt);
            prop_assert!((back - df).abs() < 1e-10);
        }
    }
}
