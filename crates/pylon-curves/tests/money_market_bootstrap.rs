//! Integration test: bootstrap a zero curve from a money-market strip.
//!
//! The instrument set follows the usual single-currency layout: deposits
//! out to six months, FRAs covering the gap to one year, and par swaps
//! from two years. Every instrument is repriced off the bootstrapped
//! curve and must recover its input quote.

use std::collections::HashMap;

use approx::assert_relative_eq;
use pylon_core::daycounts::year_fraction_act365;
use pylon_core::{Date, Frequency, Tenor};
use pylon_curves::curve::CurveType;
use pylon_curves::instruments::InstrumentKind;
use pylon_curves::YieldCurveDefinition;

fn definition_lines() -> Vec<&'static str> {
    vec![
        "CASH,1M,1",
        "CASH,3M,2",
        "CASH,6M,3",
        "FRA,6x9,4",
        "FRA,9x12,5",
        "SWAP,2Y,6",
        "SWAP,3Y,7",
        "SWAP,5Y,8",
    ]
}

fn market_quotes() -> HashMap<i32, f64> {
    [
        (1, 0.0310),
        (2, 0.0322),
        (3, 0.0335),
        (4, 0.0348),
        (5, 0.0355),
        (6, 0.0362),
        (7, 0.0371),
        (8, 0.0384),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_full_strip_reprices_all_instruments() {
    // A Monday, so the curve start needs no roll.
    let as_of = Date::from_ymd(2025, 6, 16).unwrap();

    let definition = YieldCurveDefinition::parse_lines(definition_lines(), Frequency::Annual).unwrap();
    let quotes = market_quotes();
    let curve = definition
        .bind_data_as_of(as_of, &quotes, CurveType::ZeroCouponRate)
        .unwrap();

    let start = curve.start();
    assert_eq!(start, as_of);

    // One pillar per instrument plus the anchor.
    assert_eq!(curve.len(), definition_lines().len() + 1);

    for instrument in definition.instruments() {
        let quote = match quotes.get(&instrument.id()) {
            Some(q) => *q,
            None => continue, // anchor
        };
        let maturity = instrument.maturity_date(start).unwrap();

        match instrument.kind() {
            InstrumentKind::Fake => {}
            InstrumentKind::Cash => {
                let tau = year_fraction_act365(start, maturity);
                let df = curve.discount_factor_at(maturity).unwrap();
                assert_relative_eq!((1.0 / df - 1.0) / tau, quote, epsilon = 1e-10);
            }
            InstrumentKind::Fra => {
                let accrual_start = instrument.start_date(start).unwrap().unwrap();
                let tau = year_fraction_act365(accrual_start, maturity);
                let fwd = curve
                    .forward_discount_factor(accrual_start, maturity)
                    .unwrap();
                assert_relative_eq!((1.0 / fwd - 1.0) / tau, quote, epsilon = 1e-10);
            }
            InstrumentKind::Swap => {
                let (annuity, df_final) = annual_leg(&curve, start, maturity);
                assert_relative_eq!(quote * annuity, 1.0 - df_final, epsilon = 1e-8);
            }
        }
    }
}

#[test]
fn test_curve_is_monotone_for_upward_sloping_quotes() {
    let as_of = Date::from_ymd(2025, 6, 16).unwrap();

    let definition = YieldCurveDefinition::parse_lines(definition_lines(), Frequency::Annual).unwrap();
    let curve = definition
        .bind_data_as_of(as_of, &market_quotes(), CurveType::ZeroCouponRate)
        .unwrap();

    // Discount factors decrease through the whole range, sampled between
    // pillars as well as on them.
    let last = curve.last_date().unwrap();
    let horizon = curve.start().days_between(&last);
    let mut previous = f64::INFINITY;
    let mut day = 0;
    while day <= horizon {
        let df = curve
            .discount_factor_at(curve.start().add_days(day))
            .unwrap();
        assert!(df < previous, "df not decreasing at day {day}");
        previous = df;
        day += 30;
    }
}

#[test]
fn test_weekend_settlement_rolls_curve_start() {
    // Saturday settles on the following Monday.
    let saturday = Date::from_ymd(2025, 6, 14).unwrap();
    let monday = Date::from_ymd(2025, 6, 16).unwrap();

    let definition = YieldCurveDefinition::parse_lines(definition_lines(), Frequency::Annual).unwrap();
    let quotes = market_quotes();

    let from_saturday = definition
        .bind_data_as_of(saturday, &quotes, CurveType::ZeroCouponRate)
        .unwrap();
    let from_monday = definition
        .bind_data_as_of(monday, &quotes, CurveType::ZeroCouponRate)
        .unwrap();

    assert_eq!(from_saturday.start(), monday);
    assert_eq!(from_saturday.points(), from_monday.points());
}

fn annual_leg(
    curve: &pylon_curves::YieldCurve,
    start: Date,
    maturity: Date,
) -> (f64, f64) {
    let mut annuity = 0.0;
    let mut previous = start;
    let mut df_final = 1.0;
    let mut year = 1;
    loop {
        let mut date = start.add_tenor(Tenor::years(f64::from(year))).unwrap();
        if date >= maturity {
            date = maturity;
        }
        let df = curve.discount_factor_at(date).unwrap();
        annuity += year_fraction_act365(previous, date) * df;
        if date == maturity {
            df_final = df;
            break;
        }
        previous = date;
        year += 1;
    }
    (annuity, df_final)
}
