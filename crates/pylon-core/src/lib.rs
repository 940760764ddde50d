//! # Pylon Core
//!
//! Core types and abstractions for the Pylon yield curve engine.
//!
//! This crate provides the foundational building blocks used throughout
//! Pylon:
//!
//! - **Types**: `Date`, `WorkDate`, `Tenor`, `Frequency`
//! - **Day Count Conventions**: ACT/365F and ACT/365L year fractions
//! - **Business Day Calendars**: weekend-only baseline, pluggable trait
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: fallible construction instead of sentinel
//!   "invalid" states
//!
//! ## Example
//!
//! ```rust
//! use pylon_core::prelude::*;
//!
//! let spot = Date::from_ymd(2025, 6, 16).unwrap();
//! let maturity = spot.add_tenor(Tenor::parse("6M").unwrap()).unwrap();
//! assert!(maturity > spot);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, WeekendCalendar};
    pub use crate::daycounts::{year_fraction_act365, Act365Fixed, Act365Leap, DayCount};
    pub use crate::error::{PylonError, PylonResult};
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit, WorkDate};
}

// Re-export commonly used types at crate root
pub use error::{PylonError, PylonResult};
pub use types::{Date, Frequency, Tenor, TenorUnit, WorkDate};
