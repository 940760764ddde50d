//! # Pylon Math
//!
//! Numerical utilities for the Pylon yield curve engine.
//!
//! This crate provides:
//!
//! - **Interpolation**: the shared linear interpolation routine the curve
//!   point store queries through
//! - **Solvers**: bisection root finding for the swap bootstrap step

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{linear_between, linear_series};
    pub use crate::solvers::{bisection, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
