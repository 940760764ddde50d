//! Error types for curve operations.
//!
//! Every failure is reported to the caller as a distinguishable error kind;
//! nothing is coerced to a default value or retried internally, and a
//! failure is scoped to the single operation that raised it.

use pylon_core::{Date, PylonError};
use pylon_math::MathError;
use thiserror::Error;

use crate::instruments::InstrumentKind;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Malformed instrument definition string.
    #[error("Cannot parse instrument definition: {input:?}")]
    ParseError {
        /// The offending raw text.
        input: String,
    },

    /// Query date is outside the curve's stored range.
    #[error("Date {requested} out of curve range [{min}, {max}]")]
    DateOutOfRange {
        /// The requested date.
        requested: Date,
        /// First stored date.
        min: Date,
        /// Last stored date.
        max: Date,
    },

    /// A point already exists at the given date.
    #[error("Curve point already exists at {date}")]
    DuplicateDate {
        /// The rejected insertion date.
        date: Date,
    },

    /// The curve holds no points.
    #[error("Curve is empty")]
    EmptyCurve,

    /// A registered instrument id has no supplied market value.
    #[error("No market value supplied for instrument id {id}")]
    MissingQuote {
        /// The instrument id without a quote.
        id: i32,
    },

    /// A supplied market value has no registered instrument id.
    #[error("Market value supplied for unknown instrument id {id}")]
    UnknownQuote {
        /// The unregistered quote id.
        id: i32,
    },

    /// Two instrument definitions share an id.
    #[error("Duplicate instrument id {id}")]
    DuplicateInstrumentId {
        /// The duplicated id.
        id: i32,
    },

    /// The instrument kind does not support the requested operation.
    #[error("Unsupported instrument kind {kind} for this operation")]
    UnsupportedInstrument {
        /// The offending kind.
        kind: InstrumentKind,
    },

    /// Resolving an instrument's curve contribution failed.
    #[error("Bootstrap failed for instrument id {id}: {reason}")]
    BootstrapFailed {
        /// The instrument whose resolution failed.
        id: i32,
        /// Description of the failure.
        reason: String,
    },

    /// Error propagated from core date/tenor arithmetic.
    #[error(transparent)]
    Core(#[from] PylonError),

    /// Error propagated from a numerical routine.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates a parse error naming the raw input.
    #[must_use]
    pub fn parse_error(input: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.into(),
        }
    }

    /// Creates a date out of range error.
    #[must_use]
    pub fn date_out_of_range(requested: Date, min: Date, max: Date) -> Self {
        Self::DateOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates a bootstrap failure naming the instrument id.
    #[must_use]
    pub fn bootstrap_failed(id: i32, reason: impl Into<String>) -> Self {
        Self::BootstrapFailed {
            id,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_input() {
        let err = CurveError::parse_error("JUNK,3M,1");
        assert!(err.to_string().contains("JUNK,3M,1"));
    }

    #[test]
    fn test_missing_quote_names_id() {
        let err = CurveError::MissingQuote { id: 42 };
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_out_of_range_display() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = Date::from_ymd(2025, 6, 1).unwrap();
        let d3 = Date::from_ymd(2026, 1, 1).unwrap();
        let err = CurveError::date_out_of_range(d3, d1, d2);
        assert!(err.to_string().contains("out of curve range"));
    }
}
