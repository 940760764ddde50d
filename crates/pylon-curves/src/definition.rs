//! Curve definition and bootstrap.
//!
//! A [`YieldCurveDefinition`] is the calibration recipe: the set of
//! instruments, held in bootstrap order, with a synthetic anchor pinning
//! the curve start. Binding market quotes to the definition resolves the
//! instruments one by one into a [`YieldCurve`], each instrument fixing
//! exactly one new pillar.

use std::collections::HashMap;

use log::debug;
use pylon_core::daycounts::year_fraction_act365;
use pylon_core::{Date, Frequency, Tenor, WorkDate};
use pylon_math::interpolation::linear_between;
use pylon_math::solvers::{bisection, SolverConfig};
use serde::{Deserialize, Serialize};

use crate::conversion::RateConversion;
use crate::curve::{CurveType, YieldCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{InstrumentDefinition, InstrumentKind};

/// Quote id reserved for the synthetic anchor instrument.
pub const ANCHOR_ID: i32 = -1;

/// Bracket for the final pillar's zero rate in the swap solve.
const RATE_BRACKET: (f64, f64) = (-0.5, 2.0);

/// Cap on fixed-leg coupon periods; a schedule past this is a defect in
/// the instrument's maturity.
const MAX_COUPON_PERIODS: u32 = 1000;

/// A calibration recipe: instruments in bootstrap order, plus the
/// compounding frequency of the fixed legs and of the stored zero rates.
///
/// Construction validates ids and prepends the zero-maturity anchor under
/// [`ANCHOR_ID`]; the anchor needs no market quote and always resolves to
/// a discount factor of one at the curve start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldCurveDefinition {
    instruments: Vec<InstrumentDefinition>,
    frequency: Frequency,
}

impl YieldCurveDefinition {
    /// Builds a definition from instrument definitions, sorting them into
    /// bootstrap order and prepending the anchor.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DuplicateInstrumentId` when two definitions
    /// share an id or one uses the reserved [`ANCHOR_ID`].
    pub fn new(
        definitions: Vec<InstrumentDefinition>,
        frequency: Frequency,
    ) -> CurveResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(definitions.len() + 1);
        seen.insert(ANCHOR_ID);
        for definition in &definitions {
            if !seen.insert(definition.id()) {
                return Err(CurveError::DuplicateInstrumentId {
                    id: definition.id(),
                });
            }
        }

        let mut instruments = definitions;
        instruments.push(InstrumentDefinition::fake(ANCHOR_ID));
        instruments.sort_by(InstrumentDefinition::bootstrap_cmp);

        Ok(Self {
            instruments,
            frequency,
        })
    }

    /// Parses one definition per line, skipping blank lines.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::ParseError` for a malformed line and
    /// `CurveError::DuplicateInstrumentId` for repeated ids.
    pub fn parse_lines<I, S>(lines: I, frequency: Frequency) -> CurveResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut definitions = Vec::new();
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            definitions.push(InstrumentDefinition::parse(line)?);
        }
        Self::new(definitions, frequency)
    }

    /// Returns the instruments in bootstrap order, anchor included.
    #[must_use]
    pub fn instruments(&self) -> &[InstrumentDefinition] {
        &self.instruments
    }

    /// Returns the instrument registered under `id`, if any.
    #[must_use]
    pub fn instrument_by_id(&self, id: i32) -> Option<&InstrumentDefinition> {
        self.instruments.iter().find(|i| i.id() == id)
    }

    /// Returns the fixed-leg and compounding frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Binds quotes as of today and bootstraps the curve.
    ///
    /// The curve start is today rolled forward to the next business day.
    /// See [`Self::bind_data_as_of`].
    ///
    /// # Errors
    ///
    /// See [`Self::bind_data_as_of`].
    pub fn bind_data(
        &self,
        quotes: &HashMap<i32, f64>,
        curve_type: CurveType,
    ) -> CurveResult<YieldCurve> {
        self.bind_data_as_of(Date::today(), quotes, curve_type)
    }

    /// Binds quotes to the definition and bootstraps the curve anchored
    /// at `as_of` (rolled forward to a business day).
    ///
    /// Instruments resolve in bootstrap order, each adding one pillar:
    ///
    /// - the anchor fixes a discount factor of one at the curve start;
    /// - a deposit discounts its simple rate over the full period;
    /// - an FRA chains its forward rate onto the discount factor already
    ///   resolved at its accrual start;
    /// - a swap solves the par condition over its fixed leg, in closed
    ///   form when every earlier coupon is covered by resolved pillars and
    ///   by root search otherwise.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::MissingQuote` / `CurveError::UnknownQuote`
    /// when `quotes` and the registered ids disagree, and
    /// `CurveError::BootstrapFailed` naming the offending instrument when
    /// a resolution step fails.
    pub fn bind_data_as_of(
        &self,
        as_of: Date,
        quotes: &HashMap<i32, f64>,
        curve_type: CurveType,
    ) -> CurveResult<YieldCurve> {
        self.validate_quotes(quotes)?;

        let start = WorkDate::new(as_of).date();
        let mut curve = YieldCurve::with_frequency(start, curve_type, self.frequency);

        for instrument in &self.instruments {
            if instrument.kind() == InstrumentKind::Fake {
                curve.insert_df(start, 1.0, InstrumentKind::Fake)?;
                debug!("anchored curve at {start}");
                continue;
            }

            let quote = quotes
                .get(&instrument.id())
                .copied()
                .ok_or(CurveError::MissingQuote {
                    id: instrument.id(),
                })?;
            let df = match instrument.kind() {
                // Anchors short-circuit above, before the quote lookup.
                InstrumentKind::Fake => unreachable!("anchor carries no quote"),
                InstrumentKind::Cash => resolve_cash(&curve, instrument, quote)?,
                InstrumentKind::Fra => resolve_fra(&curve, instrument, quote)?,
                InstrumentKind::Swap => {
                    resolve_swap(&curve, instrument, quote, self.frequency)?
                }
            };

            let maturity = instrument.maturity_date(start)?;
            curve
                .insert_df(maturity, df, instrument.kind())
                .map_err(|e| CurveError::bootstrap_failed(instrument.id(), e.to_string()))?;
            debug!(
                "resolved {} {} (id {}): df({maturity}) = {df:.9}",
                instrument.kind(),
                instrument.subtype(),
                instrument.id()
            );
        }

        Ok(curve)
    }

    /// Checks that quotes and registered ids match one-to-one.
    fn validate_quotes(&self, quotes: &HashMap<i32, f64>) -> CurveResult<()> {
        for instrument in &self.instruments {
            let id = instrument.id();
            if id != ANCHOR_ID && !quotes.contains_key(&id) {
                return Err(CurveError::MissingQuote { id });
            }
        }

        let unknown = quotes
            .keys()
            .copied()
            .filter(|id| !self.instruments.iter().any(|i| i.id() == *id))
            .min();
        match unknown {
            Some(id) => Err(CurveError::UnknownQuote { id }),
            None => Ok(()),
        }
    }
}

/// Deposit: the quote is a simple rate over the whole period, so
/// `df = 1 / (1 + r * tau)`.
fn resolve_cash(
    curve: &YieldCurve,
    instrument: &InstrumentDefinition,
    rate: f64,
) -> CurveResult<f64> {
    let maturity = instrument.maturity_date(curve.start())?;
    let tau = year_fraction_act365(curve.start(), maturity);
    Ok(1.0 / (1.0 + rate * tau))
}

/// FRA: the quote is a simple forward rate over the accrual period, so
/// the maturity discount factor chains off the one already resolved at
/// the accrual start: `df_end = df_start / (1 + r * tau)`.
fn resolve_fra(
    curve: &YieldCurve,
    instrument: &InstrumentDefinition,
    rate: f64,
) -> CurveResult<f64> {
    let start_date = instrument
        .start_date(curve.start())?
        .ok_or(CurveError::UnsupportedInstrument {
            kind: instrument.kind(),
        })?;
    let maturity = instrument.maturity_date(curve.start())?;

    let df_start = curve.discount_factor_at(start_date).map_err(|e| {
        CurveError::bootstrap_failed(
            instrument.id(),
            format!("accrual start {start_date} not covered by resolved pillars: {e}"),
        )
    })?;

    let tau = year_fraction_act365(start_date, maturity);
    Ok(df_start / (1.0 + rate * tau))
}

/// Par swap over a fixed leg paying at the definition's frequency:
/// `r * sum(tau_i * df_i) = 1 - df_n`.
///
/// When every coupon before the final one falls inside the resolved pillar
/// range the final discount factor comes out in closed form. Otherwise the
/// uncovered coupons depend on the unknown final pillar through
/// interpolation, and the final zero rate is found by bisection on the par
/// residual.
fn resolve_swap(
    curve: &YieldCurve,
    instrument: &InstrumentDefinition,
    rate: f64,
    frequency: Frequency,
) -> CurveResult<f64> {
    let start = curve.start();
    let maturity = instrument.maturity_date(start)?;
    let schedule = coupon_schedule(start, maturity, frequency, instrument.id())?;

    let last_pillar = curve
        .last_date()
        .ok_or_else(|| CurveError::bootstrap_failed(instrument.id(), "curve has no pillars"))?;

    // Accrual fractions between consecutive coupon dates.
    let mut accruals = Vec::with_capacity(schedule.len());
    let mut previous = start;
    for date in &schedule {
        accruals.push(year_fraction_act365(previous, *date));
        previous = *date;
    }

    let final_tau = accruals[accruals.len() - 1];
    let interior = &schedule[..schedule.len() - 1];

    if interior.iter().all(|d| *d <= last_pillar) {
        let mut annuity = 0.0;
        for (date, tau) in interior.iter().zip(&accruals) {
            annuity += tau * curve.discount_factor_at(*date)?;
        }

        let df = (1.0 - rate * annuity) / (1.0 + rate * final_tau);
        if df <= 0.0 {
            return Err(CurveError::bootstrap_failed(
                instrument.id(),
                format!("par condition yields non-positive discount factor {df}"),
            ));
        }
        return Ok(df);
    }

    // Coupons beyond the last resolved pillar interpolate against the
    // unknown final point, so solve for the final zero rate directly.
    let conversion = *curve.conversion();
    let last_value = curve.value_at(last_pillar)?;
    let offset = |d: Date| start.days_between(&d) as f64;

    let mut covered_annuity = 0.0;
    let mut open: Vec<(Date, f64)> = Vec::new();
    for (date, tau) in interior.iter().zip(&accruals) {
        if *date <= last_pillar {
            covered_annuity += tau * curve.discount_factor_at(*date)?;
        } else {
            open.push((*date, *tau));
        }
    }

    let residual = |final_rate: f64| {
        let mut annuity = covered_annuity;
        for (date, tau) in &open {
            let value = linear_between(
                (offset(last_pillar), last_value),
                (offset(maturity), final_rate),
                offset(*date),
            );
            annuity += tau * conversion.to_df(value, year_fraction_act365(start, *date));
        }
        let df_final = conversion.to_df(final_rate, year_fraction_act365(start, maturity));
        rate * (annuity + final_tau * df_final) - (1.0 - df_final)
    };

    let solved = bisection(
        residual,
        RATE_BRACKET.0,
        RATE_BRACKET.1,
        &SolverConfig::default(),
    )
    .map_err(|e| CurveError::bootstrap_failed(instrument.id(), e.to_string()))?;

    Ok(conversion.to_df(solved.root, year_fraction_act365(start, maturity)))
}

/// Fixed-leg coupon dates from the curve start to the swap maturity,
/// stepping by the payment frequency, final exchange included.
fn coupon_schedule(
    start: Date,
    maturity: Date,
    frequency: Frequency,
    id: i32,
) -> CurveResult<Vec<Date>> {
    let months = frequency.months_per_period();
    let mut schedule = Vec::new();
    for period in 1..=MAX_COUPON_PERIODS {
        let date = start.add_tenor(Tenor::months(f64::from(period * months)))?;
        if date >= maturity {
            break;
        }
        schedule.push(date);
    }
    if schedule.len() == MAX_COUPON_PERIODS as usize {
        return Err(CurveError::bootstrap_failed(
            id,
            format!("coupon schedule to {maturity} did not terminate"),
        ));
    }
    schedule.push(maturity);
    Ok(schedule)
}
