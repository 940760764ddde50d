//! # Pylon Curves
//!
//! Yield curve bootstrap for the Pylon fixed income engine.
//!
//! This crate provides:
//!
//! - **Instruments**: calibration instrument definitions (deposits, FRAs,
//!   swaps) and their text form
//! - **Definition**: the calibration recipe, instruments held in bootstrap
//!   order with a synthetic anchor
//! - **Curve**: the bootstrapped point store with linear interpolation
//! - **Conversion**: discount factor / zero rate mappings
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use pylon_core::{Date, Frequency};
//! use pylon_curves::prelude::*;
//!
//! let definition = YieldCurveDefinition::parse_lines(
//!     ["CASH,3M,1", "FRA,3x6,2", "SWAP,2Y,3"],
//!     Frequency::Annual,
//! )
//! .unwrap();
//!
//! let quotes: HashMap<i32, f64> =
//!     [(1, 0.030), (2, 0.033), (3, 0.036)].into_iter().collect();
//!
//! let as_of = Date::from_ymd(2025, 6, 16).unwrap();
//! let curve = definition
//!     .bind_data_as_of(as_of, &quotes, CurveType::ZeroCouponRate)
//!     .unwrap();
//!
//! let one_year = as_of.add_days(365);
//! let df = curve.discount_factor_at(one_year).unwrap();
//! assert!(df > 0.9 && df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod conversion;
pub mod curve;
pub mod definition;
pub mod error;
pub mod instruments;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::conversion::{RateConversion, ZeroRateConversion};
    pub use crate::curve::{compound_rate, CurvePoint, CurveType, YieldCurve};
    pub use crate::definition::{YieldCurveDefinition, ANCHOR_ID};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{InstrumentDefinition, InstrumentKind};
}

pub use curve::{CurveType, YieldCurve};
pub use definition::YieldCurveDefinition;
pub use error::{CurveError, CurveResult};
pub use instruments::{InstrumentDefinition, InstrumentKind};
