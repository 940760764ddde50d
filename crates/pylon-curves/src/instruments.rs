//! Market instrument definitions.
//!
//! An [`InstrumentDefinition`] describes one calibration instrument: what
//! kind it is, when it matures, and the id under which its market quote is
//! supplied. Definitions carry no market values; quotes are bound later by
//! the curve builder.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pylon_core::{Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Discriminant for the supported instrument kinds.
///
/// The ordering is the tie-break used when two instruments share a
/// maturity: the synthetic anchor sorts first, then deposits, forwards,
/// and swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Synthetic zero-maturity anchor pinning the curve start.
    Fake,
    /// Money-market deposit.
    Cash,
    /// Forward rate agreement.
    Fra,
    /// Fixed-for-floating interest rate swap.
    Swap,
}

impl InstrumentKind {
    /// Returns the wire label for the kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fake => "FAKE",
            Self::Cash => "CASH",
            Self::Fra => "FRA",
            Self::Swap => "SWAP",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InstrumentKind {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FAKE" => Ok(Self::Fake),
            "CASH" => Ok(Self::Cash),
            "FRA" => Ok(Self::Fra),
            "SWAP" => Ok(Self::Swap),
            _ => Err(CurveError::parse_error(s)),
        }
    }
}

/// One calibration instrument.
///
/// Construct directly with the variant constructors, or parse the text
/// form `<TYPE>,<MATURITY>,<ID>` with [`InstrumentDefinition::parse`]:
///
/// ```rust
/// use pylon_curves::instruments::InstrumentDefinition;
///
/// let cash = InstrumentDefinition::parse("CASH,3M,1").unwrap();
/// assert_eq!(cash.subtype(), "3M");
///
/// let fra = InstrumentDefinition::parse("FRA,3x6,2").unwrap();
/// assert_eq!(fra.subtype(), "3x6");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstrumentDefinition {
    /// Synthetic anchor at the curve start date.
    Fake {
        /// Zero-length maturity tenor.
        maturity: Tenor,
        /// Quote id (the builder reserves a sentinel id for the anchor).
        id: i32,
    },
    /// Money-market deposit quoted as a simple rate to maturity.
    Cash {
        /// Tenor from curve start to deposit maturity.
        maturity: Tenor,
        /// Quote id.
        id: i32,
    },
    /// Forward rate agreement quoted as a simple forward rate.
    Fra {
        /// Tenor from curve start to the accrual start.
        start: Tenor,
        /// Tenor from curve start to the accrual end.
        maturity: Tenor,
        /// Quote id.
        id: i32,
    },
    /// Par swap quoted as the fixed rate against an annual fixed leg.
    Swap {
        /// Tenor from curve start to the final exchange.
        maturity: Tenor,
        /// Quote id.
        id: i32,
    },
}

impl InstrumentDefinition {
    /// Creates the synthetic zero-maturity anchor.
    #[must_use]
    pub fn fake(id: i32) -> Self {
        Self::Fake {
            maturity: Tenor::days(0.0),
            id,
        }
    }

    /// Creates a cash deposit definition.
    #[must_use]
    pub fn cash(maturity: Tenor, id: i32) -> Self {
        Self::Cash { maturity, id }
    }

    /// Creates an FRA definition from its start and end tenors.
    #[must_use]
    pub fn fra(start: Tenor, maturity: Tenor, id: i32) -> Self {
        Self::Fra {
            start,
            maturity,
            id,
        }
    }

    /// Creates a par swap definition.
    #[must_use]
    pub fn swap(maturity: Tenor, id: i32) -> Self {
        Self::Swap { maturity, id }
    }

    /// Parses the text form `<TYPE>,<MATURITY>,<ID>`.
    ///
    /// `TYPE` is one of `CASH`, `FRA`, `SWAP`; the synthetic anchor is not
    /// part of the text format, the builder adds it itself. `MATURITY` is
    /// a tenor literal (`3M`, `10Y`). The FRA maturity takes the form
    /// `<START>x<MATURITY>` (`3x6`), where each side is a tenor literal or
    /// a bare integer read as months. Trailing line endings are tolerated,
    /// so definitions can be read straight off CRLF files.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::ParseError` naming the raw input when the line
    /// does not have exactly three comma-separated fields or any field is
    /// malformed.
    pub fn parse(line: &str) -> CurveResult<Self> {
        let trimmed = line.trim_end_matches(['\r', '\n']).trim();

        let mut fields = trimmed.split(',');
        let (Some(kind), Some(maturity), Some(id), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(CurveError::parse_error(line));
        };

        let kind: InstrumentKind = kind.parse().map_err(|_| CurveError::parse_error(line))?;
        let id: i32 = id
            .trim()
            .parse()
            .map_err(|_| CurveError::parse_error(line))?;

        match kind {
            // The anchor is builder-internal, never user-supplied.
            InstrumentKind::Fake => Err(CurveError::parse_error(line)),
            InstrumentKind::Cash => Ok(Self::cash(parse_tenor_field(maturity, line)?, id)),
            InstrumentKind::Swap => Ok(Self::swap(parse_tenor_field(maturity, line)?, id)),
            InstrumentKind::Fra => {
                let (start, end) = maturity
                    .trim()
                    .split_once(['x', 'X'])
                    .ok_or_else(|| CurveError::parse_error(line))?;
                Ok(Self::fra(
                    parse_fra_tenor_field(start, line)?,
                    parse_fra_tenor_field(end, line)?,
                    id,
                ))
            }
        }
    }

    /// Returns the kind discriminant.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Self::Fake { .. } => InstrumentKind::Fake,
            Self::Cash { .. } => InstrumentKind::Cash,
            Self::Fra { .. } => InstrumentKind::Fra,
            Self::Swap { .. } => InstrumentKind::Swap,
        }
    }

    /// Returns the quote id.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            Self::Fake { id, .. }
            | Self::Cash { id, .. }
            | Self::Fra { id, .. }
            | Self::Swap { id, .. } => *id,
        }
    }

    /// Returns the tenor from curve start to final maturity.
    #[must_use]
    pub fn maturity(&self) -> Tenor {
        match self {
            Self::Fake { maturity, .. }
            | Self::Cash { maturity, .. }
            | Self::Fra { maturity, .. }
            | Self::Swap { maturity, .. } => *maturity,
        }
    }

    /// Returns the accrual start tenor for FRAs, `None` otherwise.
    #[must_use]
    pub fn start(&self) -> Option<Tenor> {
        match self {
            Self::Fra { start, .. } => Some(*start),
            _ => None,
        }
    }

    /// Returns the human-readable subtype label: the maturity tenor for
    /// deposits and swaps (`"3M"`, `"10Y"`), and the start-by-end form for
    /// FRAs (`"3x6"`).
    #[must_use]
    pub fn subtype(&self) -> String {
        match self {
            Self::Fra {
                start, maturity, ..
            } => format!("{}x{}", start.literal(), maturity.literal()),
            _ => self.maturity().to_string(),
        }
    }

    /// Returns the maturity date when the instrument is anchored at
    /// `as_of`, rolled forward to a business day.
    ///
    /// # Errors
    ///
    /// Propagates date arithmetic failures from the underlying calendar.
    pub fn maturity_date(&self, as_of: Date) -> CurveResult<Date> {
        if self.maturity().is_zero() {
            // The anchor stays on the (already adjusted) curve start.
            Ok(as_of)
        } else {
            Ok(as_of.add_tenor(self.maturity())?)
        }
    }

    /// Returns the accrual start date for FRAs, anchored at `as_of` and
    /// rolled forward to a business day. `None` for other kinds.
    ///
    /// # Errors
    ///
    /// Propagates date arithmetic failures from the underlying calendar.
    pub fn start_date(&self, as_of: Date) -> CurveResult<Option<Date>> {
        match self.start() {
            Some(start) => Ok(Some(as_of.add_tenor(start)?)),
            None => Ok(None),
        }
    }

    /// Orders instruments for the bootstrap: by normalized maturity length,
    /// then by kind when the maturities tie.
    #[must_use]
    pub fn bootstrap_cmp(&self, other: &Self) -> Ordering {
        let lhs = self.maturity().in_days();
        let rhs = other.maturity().in_days();
        lhs.partial_cmp(&rhs)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.kind().cmp(&other.kind()))
    }
}

impl fmt::Display for InstrumentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.kind(), self.subtype(), self.id())
    }
}

/// Parses a maturity field as a tenor literal with a unit.
fn parse_tenor_field(field: &str, line: &str) -> CurveResult<Tenor> {
    Tenor::parse(field.trim()).map_err(|_| CurveError::parse_error(line))
}

/// Parses one side of an FRA `<START>x<MATURITY>` field, where a bare
/// integer is read as a month count.
fn parse_fra_tenor_field(field: &str, line: &str) -> CurveResult<Tenor> {
    let trimmed = field.trim();
    if let Ok(months) = trimmed.parse::<i64>() {
        return Ok(Tenor::months(months as f64));
    }
    parse_tenor_field(trimmed, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_core::TenorUnit;

    #[test]
    fn test_parse_cash() {
        let inst = InstrumentDefinition::parse("CASH,3M,1").unwrap();

        assert_eq!(inst.kind(), InstrumentKind::Cash);
        assert_eq!(inst.maturity(), Tenor::months(3.0));
        assert_eq!(inst.id(), 1);
        assert_eq!(inst.subtype(), "3M");
    }

    #[test]
    fn test_parse_fra() {
        let inst = InstrumentDefinition::parse("FRA,3x6,2").unwrap();

        assert_eq!(inst.kind(), InstrumentKind::Fra);
        assert_eq!(inst.start(), Some(Tenor::months(3.0)));
        assert_eq!(inst.maturity(), Tenor::months(6.0));
        assert_eq!(inst.subtype(), "3x6");
    }

    #[test]
    fn test_parse_swap() {
        let inst = InstrumentDefinition::parse("SWAP,10Y,7").unwrap();

        assert_eq!(inst.kind(), InstrumentKind::Swap);
        assert_eq!(inst.maturity(), Tenor::years(10.0));
        assert_eq!(inst.subtype(), "10Y");
    }

    #[test]
    fn test_parse_fra_bare_integers_are_months() {
        let inst = InstrumentDefinition::parse("FRA,9x12,4").unwrap();

        assert_eq!(inst.start(), Some(Tenor::months(9.0)));
        assert_eq!(inst.maturity(), Tenor::months(12.0));
    }

    #[test]
    fn test_parse_requires_unit_outside_fra() {
        // The bare-integer-as-months shorthand belongs to the FRA field
        // only; deposit and swap maturities need a unit.
        for bad in ["CASH,6,3", "SWAP,10,7"] {
            assert!(
                matches!(
                    InstrumentDefinition::parse(bad),
                    Err(CurveError::ParseError { .. })
                ),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_synthetic_anchor() {
        // The anchor is added by the curve builder, never read from text.
        let result = InstrumentDefinition::parse("FAKE,0M,5");
        assert!(matches!(result, Err(CurveError::ParseError { .. })));
    }

    #[test]
    fn test_parse_tolerates_crlf_and_case() {
        let inst = InstrumentDefinition::parse("cash,3M,1\r\n").unwrap();
        assert_eq!(inst.kind(), InstrumentKind::Cash);

        let inst = InstrumentDefinition::parse("FRA,3X6,2\n").unwrap();
        assert_eq!(inst.subtype(), "3x6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "CASH,3M",
            "CASH,3M,1,extra",
            "BOND,3M,1",
            "CASH,?,1",
            "CASH,3M,one",
            "FRA,3M,2",
        ] {
            let err = InstrumentDefinition::parse(bad);
            assert!(
                matches!(err, Err(CurveError::ParseError { .. })),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for line in ["CASH,3M,1", "FRA,3x6,2", "SWAP,10Y,7"] {
            let inst = InstrumentDefinition::parse(line).unwrap();
            assert_eq!(inst.to_string(), line);
        }
    }

    #[test]
    fn test_bootstrap_order_by_maturity() {
        let cash = InstrumentDefinition::parse("CASH,3M,1").unwrap();
        let swap = InstrumentDefinition::parse("SWAP,2Y,2").unwrap();

        assert_eq!(cash.bootstrap_cmp(&swap), Ordering::Less);
        assert_eq!(swap.bootstrap_cmp(&cash), Ordering::Greater);
    }

    #[test]
    fn test_bootstrap_order_kind_tie_break() {
        // Same 6M maturity: deposits before forwards before swaps.
        let cash = InstrumentDefinition::cash(Tenor::months(6.0), 1);
        let fra = InstrumentDefinition::fra(Tenor::months(3.0), Tenor::months(6.0), 2);
        let swap = InstrumentDefinition::swap(Tenor::months(6.0), 3);

        assert_eq!(cash.bootstrap_cmp(&fra), Ordering::Less);
        assert_eq!(fra.bootstrap_cmp(&swap), Ordering::Less);
        assert_eq!(cash.bootstrap_cmp(&swap), Ordering::Less);
    }

    #[test]
    fn test_fake_sorts_first() {
        let fake = InstrumentDefinition::fake(-1);
        let cash = InstrumentDefinition::cash(Tenor::days(0.0), 1);

        assert!(fake.maturity().is_zero());
        assert_eq!(fake.bootstrap_cmp(&cash), Ordering::Less);
    }

    #[test]
    fn test_maturity_date_rolls_to_business_day() {
        // 2025-06-06 is a Friday; one day later lands on Saturday and
        // rolls to Monday 2025-06-09.
        let friday = Date::from_ymd(2025, 6, 6).unwrap();
        let inst = InstrumentDefinition::cash(Tenor::new(1.0, TenorUnit::Day), 1);

        assert_eq!(
            inst.maturity_date(friday).unwrap(),
            Date::from_ymd(2025, 6, 9).unwrap()
        );
    }

    #[test]
    fn test_fra_start_date() {
        let as_of = Date::from_ymd(2025, 6, 2).unwrap();
        let inst = InstrumentDefinition::fra(Tenor::months(3.0), Tenor::months(6.0), 2);

        let start = inst.start_date(as_of).unwrap().unwrap();
        let end = inst.maturity_date(as_of).unwrap();
        assert!(start < end);
        assert_eq!(start, Date::from_ymd(2025, 9, 2).unwrap());
    }
}
